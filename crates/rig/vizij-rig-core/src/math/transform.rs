use super::rotation::slerp_quat;
use crate::value::Transform;

/// Blend two transforms: translation and scale linearly, rotation along the
/// shortest arc. `t` is not clamped.
pub fn lerp_transform(a: &Transform, b: &Transform, t: f32) -> Transform {
    Transform {
        translation: a.translation.lerp(&b.translation, t),
        rotation: slerp_quat(&a.rotation, &b.rotation, t),
        scale: a.scale.lerp(&b.scale, t),
    }
}
