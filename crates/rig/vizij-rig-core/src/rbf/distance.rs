//! Distance metrics between RBF keys.

use std::fmt::Debug;
use std::hash::Hasher;

use serde::{Deserialize, Serialize};

use super::hash::hash_f32;
use crate::config::RbfSettings;
use crate::math::rotation::{is_nearly_zero, quat_angle, quat_dot};
use crate::math::swing_twist::swing_twist_decompose;
use crate::value::{Quat, Vec3};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistanceMetric {
    /// L2 norm of the component difference.
    #[default]
    Euclidean,
    /// L1 norm of the component difference.
    Manhattan,
    /// Great-circle angle between rotations, in radians.
    ArcLength,
    /// Angle of the swing part of the relative rotation.
    SwingAngle,
    /// Angle of the twist part of the relative rotation.
    TwistAngle,
}

impl DistanceMetric {
    pub const ALL: [DistanceMetric; 5] = [
        DistanceMetric::Euclidean,
        DistanceMetric::Manhattan,
        DistanceMetric::ArcLength,
        DistanceMetric::SwingAngle,
        DistanceMetric::TwistAngle,
    ];

    /// Whether the metric reads the twist axis.
    pub fn uses_twist_axis(self) -> bool {
        matches!(self, DistanceMetric::SwingAngle | DistanceMetric::TwistAngle)
    }
}

/// A type usable as an RBF target key.
pub trait RbfKey: Clone + Debug {
    /// Non-negative distance under `metric`. Symmetric for every metric.
    fn distance(&self, other: &Self, metric: DistanceMetric, twist_axis: &Vec3) -> f32;

    /// Feed the key into `state`. Keys that compare equal must hash equally,
    /// including `+0.0`/`-0.0` and any NaN payload.
    fn hash_into<H: Hasher>(&self, state: &mut H);

    /// Kernel radius in this key's distance units.
    fn sigma(settings: &RbfSettings) -> f32;
}

impl RbfKey for Vec3 {
    fn distance(&self, other: &Self, metric: DistanceMetric, _twist_axis: &Vec3) -> f32 {
        vector_distance(self, other, metric)
    }

    fn hash_into<H: Hasher>(&self, state: &mut H) {
        for c in self.iter() {
            hash_f32(*c, state);
        }
    }

    fn sigma(settings: &RbfSettings) -> f32 {
        settings.sigma_for_vector()
    }
}

impl RbfKey for Quat {
    fn distance(&self, other: &Self, metric: DistanceMetric, twist_axis: &Vec3) -> f32 {
        quat_distance(self, other, metric, twist_axis)
    }

    fn hash_into<H: Hasher>(&self, state: &mut H) {
        for c in self.coords.iter() {
            hash_f32(*c, state);
        }
    }

    fn sigma(settings: &RbfSettings) -> f32 {
        settings.sigma_for_quat()
    }
}

/// Distance between two points. Rotational metrics have no meaning for
/// vectors and measure straight-line distance instead.
pub fn vector_distance(a: &Vec3, b: &Vec3, metric: DistanceMetric) -> f32 {
    let d = a - b;
    match metric {
        DistanceMetric::Manhattan => d.x.abs() + d.y.abs() + d.z.abs(),
        DistanceMetric::Euclidean
        | DistanceMetric::ArcLength
        | DistanceMetric::SwingAngle
        | DistanceMetric::TwistAngle => d.norm(),
    }
}

/// Distance between two rotations.
///
/// `Euclidean` and `Manhattan` compare raw components, so `q` and `-q` are
/// far apart under them. The angular metrics are double-cover safe.
pub fn quat_distance(a: &Quat, b: &Quat, metric: DistanceMetric, twist_axis: &Vec3) -> f32 {
    match metric {
        DistanceMetric::Euclidean => (a.coords - b.coords).norm(),
        DistanceMetric::Manhattan => (a.coords - b.coords).iter().map(|c| c.abs()).sum(),
        DistanceMetric::ArcLength => 2.0 * quat_dot(a, b).abs().clamp(0.0, 1.0).acos(),
        DistanceMetric::SwingAngle | DistanceMetric::TwistAngle => {
            if is_nearly_zero(twist_axis) {
                return 0.0;
            }
            let relative = a.inverse() * b;
            let (swing, twist) = swing_twist_decompose(&relative, twist_axis);
            if metric == DistanceMetric::SwingAngle {
                quat_angle(&swing)
            } else {
                quat_angle(&twist)
            }
        }
    }
}
