//! Euler angle <-> quaternion conversion for all six rotation orders.
//!
//! Angles cross the API in degrees, stored as a `Vec3` of rotations about
//! the X, Y and Z axes. The rotation order names the sequence in which the
//! axis rotations are applied, so `XYZ` composes as `qz * qy * qx`.
//! Conversions run in f64 internally so round trips stay well inside f32
//! precision away from gimbal lock.

use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use super::tolerance::GIMBAL_EPSILON;
use crate::value::{Quat, Vec3};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationOrder {
    #[default]
    XYZ,
    XZY,
    YXZ,
    YZX,
    ZXY,
    ZYX,
}

impl RotationOrder {
    pub const ALL: [RotationOrder; 6] = [
        RotationOrder::XYZ,
        RotationOrder::XZY,
        RotationOrder::YXZ,
        RotationOrder::YZX,
        RotationOrder::ZXY,
        RotationOrder::ZYX,
    ];

    /// Axis indices in application order (first, second, last).
    #[inline]
    fn axes(self) -> (usize, usize, usize) {
        match self {
            RotationOrder::XYZ => (0, 1, 2),
            RotationOrder::XZY => (0, 2, 1),
            RotationOrder::YXZ => (1, 0, 2),
            RotationOrder::YZX => (1, 2, 0),
            RotationOrder::ZXY => (2, 0, 1),
            RotationOrder::ZYX => (2, 1, 0),
        }
    }

    /// +1 for cyclic (even) axis sequences, -1 otherwise.
    #[inline]
    fn parity(self) -> f64 {
        match self {
            RotationOrder::XYZ | RotationOrder::YZX | RotationOrder::ZXY => 1.0,
            RotationOrder::XZY | RotationOrder::YXZ | RotationOrder::ZYX => -1.0,
        }
    }
}

fn axis_quat(axis: usize, radians: f64) -> UnitQuaternion<f64> {
    let unit = match axis {
        0 => Vector3::x_axis(),
        1 => Vector3::y_axis(),
        _ => Vector3::z_axis(),
    };
    UnitQuaternion::from_axis_angle(&unit, radians)
}

/// Build a rotation from Euler angles in degrees.
pub fn quat_from_euler(euler_degrees: &Vec3, order: RotationOrder) -> Quat {
    let (i, j, k) = order.axes();
    let angle = |axis: usize| f64::from(euler_degrees[axis]).to_radians();
    let q = axis_quat(k, angle(k)) * axis_quat(j, angle(j)) * axis_quat(i, angle(i));
    Quat::new_normalize(Quaternion::new(q.w as f32, q.i as f32, q.j as f32, q.k as f32))
}

/// Rotation matrix rows of `q`, computed in f64.
fn rotation_rows(q: &Quat) -> [[f64; 3]; 3] {
    let (x, y, z, w) = (
        f64::from(q.i),
        f64::from(q.j),
        f64::from(q.k),
        f64::from(q.w),
    );
    [
        [
            1.0 - 2.0 * (y * y + z * z),
            2.0 * (x * y - z * w),
            2.0 * (x * z + y * w),
        ],
        [
            2.0 * (x * y + z * w),
            1.0 - 2.0 * (x * x + z * z),
            2.0 * (y * z - x * w),
        ],
        [
            2.0 * (x * z - y * w),
            2.0 * (y * z + x * w),
            1.0 - 2.0 * (x * x + y * y),
        ],
    ]
}

/// Extract Euler angles in degrees from a rotation.
///
/// At gimbal lock the last-applied angle is forced to 0 and the first-applied
/// angle absorbs the remaining rotation.
pub fn euler_from_quat(q: &Quat, order: RotationOrder) -> Vec3 {
    let (i, j, k) = order.axes();
    let s = order.parity();
    let m = rotation_rows(q);

    let sin_mid = (-s * m[k][i]).clamp(-1.0, 1.0);
    let mid = sin_mid.asin();

    let (first, last) = if 1.0 - sin_mid.abs() > GIMBAL_EPSILON {
        let first = (s * m[k][j]).atan2(m[k][k]);
        let last = (s * m[j][i]).atan2(m[i][i]);
        (first, last)
    } else {
        let first = (-s * m[j][k]).atan2(m[j][j]);
        (first, 0.0)
    };

    let mut out = Vec3::zeros();
    out[i] = first.to_degrees() as f32;
    out[j] = mid.to_degrees() as f32;
    out[k] = last.to_degrees() as f32;
    out
}
