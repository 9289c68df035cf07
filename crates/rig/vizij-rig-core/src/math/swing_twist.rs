//! Swing-twist decomposition of a rotation about an axis.

use nalgebra::Quaternion;

use super::rotation::is_nearly_zero;
use super::tolerance::SMALL_NUMBER;
use crate::value::{Quat, Vec3};

/// Split `q` into `(swing, twist)` with `q = swing * twist`.
///
/// `twist` rotates about `axis` only; `swing` carries the rest. A near-zero
/// axis yields `(identity, identity)`. When `q` has no component about the
/// axis at all (a 180° swing) the twist is the identity.
pub fn swing_twist_decompose(q: &Quat, axis: &Vec3) -> (Quat, Quat) {
    if is_nearly_zero(axis) {
        return (Quat::identity(), Quat::identity());
    }
    let n = axis.normalize();
    let projected = n * q.imag().dot(&n);
    let raw = Quaternion::new(q.w, projected.x, projected.y, projected.z);
    let twist = if raw.norm() <= SMALL_NUMBER {
        Quat::identity()
    } else {
        Quat::new_normalize(raw)
    };
    let swing = q * twist.inverse();
    (swing, twist)
}
