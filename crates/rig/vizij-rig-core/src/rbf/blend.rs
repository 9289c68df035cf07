//! Weighted blending of target values.
//!
//! Weights are applied as given; nothing here renormalizes them. Rotations
//! are accumulated as 4-vectors with each contribution flipped onto the
//! accumulator's hemisphere, then normalized once at the end.

use nalgebra::{Quaternion, Vector4};

use crate::math::tolerance::SMALL_NUMBER;
use crate::value::{Color, Quat, Transform, Vec3};

/// A value that can be formed as a weighted combination of samples.
pub trait WeightedBlend: Sized {
    type Accumulator;

    /// Result of blending nothing.
    fn neutral() -> Self;

    fn accumulator() -> Self::Accumulator;

    fn accumulate(acc: &mut Self::Accumulator, value: &Self, weight: f32);

    fn finish(acc: Self::Accumulator) -> Self;
}

/// Blend `(value, weight)` pairs.
pub fn blend_weighted<'a, V, I>(samples: I) -> V
where
    V: WeightedBlend + 'a,
    I: IntoIterator<Item = (&'a V, f32)>,
{
    let mut acc = V::accumulator();
    for (value, weight) in samples {
        V::accumulate(&mut acc, value, weight);
    }
    V::finish(acc)
}

impl WeightedBlend for f32 {
    type Accumulator = f32;

    fn neutral() -> Self {
        0.0
    }

    fn accumulator() -> f32 {
        0.0
    }

    fn accumulate(acc: &mut f32, value: &f32, weight: f32) {
        *acc += value * weight;
    }

    fn finish(acc: f32) -> f32 {
        acc
    }
}

impl WeightedBlend for Vec3 {
    type Accumulator = Vec3;

    fn neutral() -> Self {
        Vec3::zeros()
    }

    fn accumulator() -> Vec3 {
        Vec3::zeros()
    }

    fn accumulate(acc: &mut Vec3, value: &Vec3, weight: f32) {
        *acc += value * weight;
    }

    fn finish(acc: Vec3) -> Vec3 {
        acc
    }
}

impl WeightedBlend for Color {
    type Accumulator = [f32; 4];

    fn neutral() -> Self {
        Color::TRANSPARENT
    }

    fn accumulator() -> [f32; 4] {
        [0.0; 4]
    }

    fn accumulate(acc: &mut [f32; 4], value: &Color, weight: f32) {
        for (sum, c) in acc.iter_mut().zip(value.to_array()) {
            *sum += c * weight;
        }
    }

    fn finish(acc: [f32; 4]) -> Color {
        Color::from(acc)
    }
}

/// Hemisphere-aligned quaternion sum.
#[derive(Clone, Copy, Debug)]
pub struct QuatAccumulator {
    sum: Vector4<f32>,
}

impl Default for QuatAccumulator {
    fn default() -> Self {
        Self {
            sum: Vector4::zeros(),
        }
    }
}

impl QuatAccumulator {
    pub fn add(&mut self, q: &Quat, weight: f32) {
        let term = q.coords * weight;
        if self.sum.dot(&term) < 0.0 {
            self.sum -= term;
        } else {
            self.sum += term;
        }
    }

    /// Normalized sum, or identity when the sum cancels out.
    pub fn finish(self) -> Quat {
        if self.sum.norm() <= SMALL_NUMBER {
            Quat::identity()
        } else {
            Quat::new_normalize(Quaternion::from(self.sum))
        }
    }
}

impl WeightedBlend for Quat {
    type Accumulator = QuatAccumulator;

    fn neutral() -> Self {
        Quat::identity()
    }

    fn accumulator() -> QuatAccumulator {
        QuatAccumulator::default()
    }

    fn accumulate(acc: &mut QuatAccumulator, value: &Quat, weight: f32) {
        acc.add(value, weight);
    }

    fn finish(acc: QuatAccumulator) -> Quat {
        acc.finish()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct TransformAccumulator {
    translation: Vec3,
    rotation: QuatAccumulator,
    scale: Vec3,
}

impl Default for TransformAccumulator {
    fn default() -> Self {
        Self {
            translation: Vec3::zeros(),
            rotation: QuatAccumulator::default(),
            scale: Vec3::zeros(),
        }
    }
}

impl WeightedBlend for Transform {
    type Accumulator = TransformAccumulator;

    fn neutral() -> Self {
        Transform::identity()
    }

    fn accumulator() -> TransformAccumulator {
        TransformAccumulator::default()
    }

    fn accumulate(acc: &mut TransformAccumulator, value: &Transform, weight: f32) {
        acc.translation += value.translation * weight;
        acc.rotation.add(&value.rotation, weight);
        acc.scale += value.scale * weight;
    }

    fn finish(acc: TransformAccumulator) -> Transform {
        Transform {
            translation: acc.translation,
            rotation: acc.rotation.finish(),
            scale: acc.scale,
        }
    }
}
