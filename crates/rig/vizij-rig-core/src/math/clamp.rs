//! Spatial clamping of a point inside a reference frame.

use serde::{Deserialize, Serialize};

use super::rotation::is_nearly_zero;
use crate::value::{Transform, Vec3};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    #[default]
    X,
    Y,
    Z,
}

impl Axis {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn unit(self) -> Vec3 {
        let mut v = Vec3::zeros();
        v[self.index()] = 1.0;
        v
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClampMode {
    /// Clamp the coordinate along `axis`.
    #[default]
    Plane,
    /// Clamp the distance from the line through the origin along `axis`.
    Cylinder,
    /// Clamp the distance from the origin.
    Sphere,
}

/// Clamp `value` (given in world space) against `[min, max]` in the local
/// frame of `space`, then map the result back to world space.
///
/// Radial modes treat a negative `min` as 0. A point sitting exactly on the
/// origin (or axis), within `LENGTH_EPSILON`, has no direction and is
/// returned unchanged.
pub fn clamp_spatially(
    value: &Vec3,
    axis: Axis,
    mode: ClampMode,
    min: f32,
    max: f32,
    space: &Transform,
) -> Vec3 {
    let mut local = space.inverse_transform_point(value);
    match mode {
        ClampMode::Plane => {
            let i = axis.index();
            local[i] = clamp_scalar(local[i], min, max);
        }
        ClampMode::Cylinder => {
            let i = axis.index();
            let along = local[i];
            let mut radial = local;
            radial[i] = 0.0;
            local = clamp_length(&radial, min, max);
            local[i] = along;
        }
        ClampMode::Sphere => {
            local = clamp_length(&local, min, max);
        }
    }
    space.transform_point(&local)
}

/// `max` wins when the bounds are inverted.
#[inline]
fn clamp_scalar(v: f32, min: f32, max: f32) -> f32 {
    v.max(min).min(max)
}

fn clamp_length(v: &Vec3, min: f32, max: f32) -> Vec3 {
    if is_nearly_zero(v) {
        return *v;
    }
    let len = v.norm();
    let target = clamp_scalar(len, min.max(0.0), max.max(0.0));
    v * (target / len)
}
