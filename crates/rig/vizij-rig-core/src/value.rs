//! Value types shared by the math library and the RBF blend.
//!
//! Vectors and rotations are plain `nalgebra` types. `Color` and `Transform`
//! are small `Copy` records with serde support so they can live in fixtures
//! and settings files.

use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::math::tolerance::SMALL_NUMBER;

/// 3D vector (x, y, z).
pub type Vec3 = Vector3<f32>;

/// Unit quaternion used for every rotation in the crate.
pub type Quat = UnitQuaternion<f32>;

/// RGBA color (linear by convention).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// All channels zero.
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[f32; 4]> for Color {
    fn from(c: [f32; 4]) -> Self {
        Color::new(c[0], c[1], c[2], c[3])
    }
}

/// Rigid transform with non-uniform scale. Points are scaled, then rotated,
/// then translated.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn new(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    pub fn identity() -> Self {
        Self {
            translation: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::identity()
        }
    }

    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            rotation,
            ..Self::identity()
        }
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Map a point from this transform's local space into its parent space.
    #[inline]
    pub fn transform_point(&self, point: &Vec3) -> Vec3 {
        self.rotation * point.component_mul(&self.scale) + self.translation
    }

    /// Rotate a direction, ignoring translation and scale.
    #[inline]
    pub fn transform_vector_no_scale(&self, vector: &Vec3) -> Vec3 {
        self.rotation * vector
    }

    /// Map a point from parent space into this transform's local space.
    /// Axes with a zero scale collapse to 0 instead of dividing by zero.
    pub fn inverse_transform_point(&self, point: &Vec3) -> Vec3 {
        let unrotated = self.rotation.inverse() * (point - self.translation);
        unrotated.zip_map(&self.scale, |v, s| {
            if s.abs() <= SMALL_NUMBER {
                0.0
            } else {
                v / s
            }
        })
    }
}
