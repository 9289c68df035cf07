//! Vector and quaternion helpers used across the rig math.
//!
//! - angle between vectors
//! - shortest-arc rotation between directions (antipodal safe)
//! - shortest-path SLERP with an NLERP fast path
//! - zero-safe normalization

use nalgebra::{Quaternion, Unit};

use super::tolerance::{LENGTH_EPSILON, SLERP_DOT_THRESHOLD};
use crate::value::{Quat, Vec3};

/// Whether `v` is too short to define a direction.
#[inline]
pub fn is_nearly_zero(v: &Vec3) -> bool {
    v.norm() <= LENGTH_EPSILON
}

/// Normalize `v`, returning the zero vector when it is too short.
#[inline]
pub fn safe_normalize(v: &Vec3) -> Vec3 {
    let len = v.norm();
    if len <= LENGTH_EPSILON {
        Vec3::zeros()
    } else {
        v / len
    }
}

/// Angle in radians between two vectors; 0 when either is near zero.
pub fn angle_between(a: &Vec3, b: &Vec3) -> f32 {
    let la = a.norm();
    let lb = b.norm();
    if la <= LENGTH_EPSILON || lb <= LENGTH_EPSILON {
        return 0.0;
    }
    (a.dot(b) / (la * lb)).clamp(-1.0, 1.0).acos()
}

/// 4D dot product of two quaternions.
#[inline]
pub fn quat_dot(a: &Quat, b: &Quat) -> f32 {
    a.coords.dot(&b.coords)
}

/// Rotation angle of `q` in radians, folded into [0, π].
#[inline]
pub fn quat_angle(q: &Quat) -> f32 {
    2.0 * q.w.abs().clamp(0.0, 1.0).acos()
}

/// Rotation of `angle` radians about `axis`; identity for a near-zero axis.
pub fn quat_from_axis_angle(axis: &Vec3, angle: f32) -> Quat {
    if is_nearly_zero(axis) {
        return Quat::identity();
    }
    Quat::from_axis_angle(&Unit::new_normalize(*axis), angle)
}

/// Shortest-arc rotation taking unit vector `a` onto unit vector `b`.
///
/// Opposite vectors pick a rotation axis perpendicular to `a`.
pub fn find_quat_between_normals(a: &Vec3, b: &Vec3) -> Quat {
    let w = 1.0 + a.dot(b);
    let q = if w >= 1.0e-6 {
        let axis = a.cross(b);
        Quaternion::new(w, axis.x, axis.y, axis.z)
    } else if a.x.abs() > a.z.abs() {
        Quaternion::new(0.0, -a.y, a.x, 0.0)
    } else {
        Quaternion::new(0.0, 0.0, -a.z, a.y)
    };
    Quat::new_normalize(q)
}

/// Shortest-arc rotation between two arbitrary vectors; identity when either
/// is near zero.
pub fn find_quat_between_vectors(a: &Vec3, b: &Vec3) -> Quat {
    if is_nearly_zero(a) || is_nearly_zero(b) {
        return Quat::identity();
    }
    find_quat_between_normals(&a.normalize(), &b.normalize())
}

/// Spherical interpolation along the shortest path.
///
/// If the dot product is negative the second quaternion is negated so the
/// blend stays on one hemisphere of the double cover.
pub fn slerp_quat(a: &Quat, b: &Quat, t: f32) -> Quat {
    let qa = a.coords;
    let mut qb = b.coords;
    let mut dot = qa.dot(&qb);
    if dot < 0.0 {
        qb = -qb;
        dot = -dot;
    }

    // Nearly parallel: lerp and renormalize
    if dot > SLERP_DOT_THRESHOLD {
        return Quat::new_normalize(Quaternion::from(qa.lerp(&qb, t)));
    }

    let theta_0 = dot.clamp(-1.0, 1.0).acos();
    let theta = theta_0 * t;
    let sin_theta_0 = theta_0.sin();
    let s0 = (theta_0 - theta).sin() / sin_theta_0;
    let s1 = theta.sin() / sin_theta_0;
    Quat::new_normalize(Quaternion::from(qa * s0 + qb * s1))
}
