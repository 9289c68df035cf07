//! Cubic four-point Bezier evaluation (de Casteljau).

use serde::{Deserialize, Serialize};

use super::rotation::safe_normalize;
use crate::value::Vec3;

/// Control points of a cubic Bezier segment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FourPointBezier {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
    pub d: Vec3,
}

impl FourPointBezier {
    pub fn new(a: Vec3, b: Vec3, c: Vec3, d: Vec3) -> Self {
        Self { a, b, c, d }
    }

    /// Position and unit tangent at `t`. See [`four_point_bezier`].
    pub fn evaluate(&self, t: f32) -> (Vec3, Vec3) {
        four_point_bezier(self, t)
    }
}

/// Evaluate the curve at `t`, returning `(position, tangent)`.
///
/// The tangent is the normalized difference of the last two intermediate
/// points and is the zero vector when that difference vanishes.
pub fn four_point_bezier(bezier: &FourPointBezier, t: f32) -> (Vec3, Vec3) {
    let ab = bezier.a.lerp(&bezier.b, t);
    let bc = bezier.b.lerp(&bezier.c, t);
    let cd = bezier.c.lerp(&bezier.d, t);
    let abbc = ab.lerp(&bc, t);
    let bccd = bc.lerp(&cd, t);
    let position = abbc.lerp(&bccd, t);
    let tangent = safe_normalize(&(bccd - abbc));
    (position, tangent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn arch() -> FourPointBezier {
        FourPointBezier::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn midpoint_position_and_tangent() {
        let (pos, tangent) = arch().evaluate(0.5);
        assert_relative_eq!(pos, Vec3::new(0.75, 0.5, 0.0), epsilon = 1e-6);
        assert_relative_eq!(tangent, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn endpoints_are_interpolated() {
        let curve = arch();
        assert_relative_eq!(curve.evaluate(0.0).0, curve.a);
        assert_relative_eq!(curve.evaluate(1.0).0, curve.d);
        // Start tangent follows A -> B
        assert_relative_eq!(curve.evaluate(0.0).1, Vec3::x(), epsilon = 1e-6);
    }

    #[test]
    fn collapsed_curve_has_zero_tangent() {
        let p = Vec3::new(2.0, 3.0, 4.0);
        let (pos, tangent) = FourPointBezier::new(p, p, p, p).evaluate(0.3);
        assert_relative_eq!(pos, p, epsilon = 1e-6);
        assert_eq!(tangent, Vec3::zeros());
    }
}
