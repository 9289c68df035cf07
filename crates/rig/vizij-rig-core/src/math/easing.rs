//! Named easing curves over the unit interval.
//!
//! Formulas follow Robert Penner's equations in the form popularized by the
//! AHEasing library. Input is not clamped; square roots clamp their argument
//! at zero so out-of-range input never produces NaN.

use std::f32::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EasingType {
    #[default]
    Linear,
    QuadraticEaseIn,
    QuadraticEaseOut,
    QuadraticEaseInOut,
    CubicEaseIn,
    CubicEaseOut,
    CubicEaseInOut,
    QuarticEaseIn,
    QuarticEaseOut,
    QuarticEaseInOut,
    QuinticEaseIn,
    QuinticEaseOut,
    QuinticEaseInOut,
    SineEaseIn,
    SineEaseOut,
    SineEaseInOut,
    CircularEaseIn,
    CircularEaseOut,
    CircularEaseInOut,
    ExponentialEaseIn,
    ExponentialEaseOut,
    ExponentialEaseInOut,
    ElasticEaseIn,
    ElasticEaseOut,
    ElasticEaseInOut,
    BackEaseIn,
    BackEaseOut,
    BackEaseInOut,
    BounceEaseIn,
    BounceEaseOut,
    BounceEaseInOut,
}

impl EasingType {
    pub const ALL: [EasingType; 31] = [
        EasingType::Linear,
        EasingType::QuadraticEaseIn,
        EasingType::QuadraticEaseOut,
        EasingType::QuadraticEaseInOut,
        EasingType::CubicEaseIn,
        EasingType::CubicEaseOut,
        EasingType::CubicEaseInOut,
        EasingType::QuarticEaseIn,
        EasingType::QuarticEaseOut,
        EasingType::QuarticEaseInOut,
        EasingType::QuinticEaseIn,
        EasingType::QuinticEaseOut,
        EasingType::QuinticEaseInOut,
        EasingType::SineEaseIn,
        EasingType::SineEaseOut,
        EasingType::SineEaseInOut,
        EasingType::CircularEaseIn,
        EasingType::CircularEaseOut,
        EasingType::CircularEaseInOut,
        EasingType::ExponentialEaseIn,
        EasingType::ExponentialEaseOut,
        EasingType::ExponentialEaseInOut,
        EasingType::ElasticEaseIn,
        EasingType::ElasticEaseOut,
        EasingType::ElasticEaseInOut,
        EasingType::BackEaseIn,
        EasingType::BackEaseOut,
        EasingType::BackEaseInOut,
        EasingType::BounceEaseIn,
        EasingType::BounceEaseOut,
        EasingType::BounceEaseInOut,
    ];

    /// Evaluate this curve at `p`.
    #[inline]
    pub fn ease(self, p: f32) -> f32 {
        ease_float(p, self)
    }

    /// Whether the curve leaves [0, 1] somewhere inside the unit interval.
    pub fn overshoots(self) -> bool {
        matches!(
            self,
            EasingType::ElasticEaseIn
                | EasingType::ElasticEaseOut
                | EasingType::ElasticEaseInOut
                | EasingType::BackEaseIn
                | EasingType::BackEaseOut
                | EasingType::BackEaseInOut
        )
    }
}

/// Evaluate the easing curve `kind` at `value`.
pub fn ease_float(value: f32, kind: EasingType) -> f32 {
    let p = value;
    match kind {
        EasingType::Linear => p,

        EasingType::QuadraticEaseIn => p * p,
        EasingType::QuadraticEaseOut => -(p * (p - 2.0)),
        EasingType::QuadraticEaseInOut => {
            if p < 0.5 {
                2.0 * p * p
            } else {
                -2.0 * p * p + 4.0 * p - 1.0
            }
        }

        EasingType::CubicEaseIn => p * p * p,
        EasingType::CubicEaseOut => {
            let f = p - 1.0;
            f * f * f + 1.0
        }
        EasingType::CubicEaseInOut => {
            if p < 0.5 {
                4.0 * p * p * p
            } else {
                let f = 2.0 * p - 2.0;
                0.5 * f * f * f + 1.0
            }
        }

        EasingType::QuarticEaseIn => p * p * p * p,
        EasingType::QuarticEaseOut => {
            let f = p - 1.0;
            f * f * f * (1.0 - p) + 1.0
        }
        EasingType::QuarticEaseInOut => {
            if p < 0.5 {
                8.0 * p * p * p * p
            } else {
                let f = p - 1.0;
                -8.0 * f * f * f * f + 1.0
            }
        }

        EasingType::QuinticEaseIn => p * p * p * p * p,
        EasingType::QuinticEaseOut => {
            let f = p - 1.0;
            f * f * f * f * f + 1.0
        }
        EasingType::QuinticEaseInOut => {
            if p < 0.5 {
                16.0 * p * p * p * p * p
            } else {
                let f = 2.0 * p - 2.0;
                0.5 * f * f * f * f * f + 1.0
            }
        }

        EasingType::SineEaseIn => ((p - 1.0) * FRAC_PI_2).sin() + 1.0,
        EasingType::SineEaseOut => (p * FRAC_PI_2).sin(),
        EasingType::SineEaseInOut => 0.5 * (1.0 - (p * PI).cos()),

        EasingType::CircularEaseIn => 1.0 - (1.0 - p * p).max(0.0).sqrt(),
        EasingType::CircularEaseOut => ((2.0 - p) * p).max(0.0).sqrt(),
        EasingType::CircularEaseInOut => {
            if p < 0.5 {
                0.5 * (1.0 - (1.0 - 4.0 * p * p).max(0.0).sqrt())
            } else {
                0.5 * ((-(2.0 * p - 3.0) * (2.0 * p - 1.0)).max(0.0).sqrt() + 1.0)
            }
        }

        EasingType::ExponentialEaseIn => {
            if p == 0.0 {
                p
            } else {
                2f32.powf(10.0 * (p - 1.0))
            }
        }
        EasingType::ExponentialEaseOut => {
            if p == 1.0 {
                p
            } else {
                1.0 - 2f32.powf(-10.0 * p)
            }
        }
        EasingType::ExponentialEaseInOut => {
            if p == 0.0 || p == 1.0 {
                p
            } else if p < 0.5 {
                0.5 * 2f32.powf(20.0 * p - 10.0)
            } else {
                -0.5 * 2f32.powf(-20.0 * p + 10.0) + 1.0
            }
        }

        EasingType::ElasticEaseIn => (13.0 * FRAC_PI_2 * p).sin() * 2f32.powf(10.0 * (p - 1.0)),
        EasingType::ElasticEaseOut => {
            (-13.0 * FRAC_PI_2 * (p + 1.0)).sin() * 2f32.powf(-10.0 * p) + 1.0
        }
        EasingType::ElasticEaseInOut => {
            if p < 0.5 {
                0.5 * (13.0 * FRAC_PI_2 * (2.0 * p)).sin() * 2f32.powf(10.0 * (2.0 * p - 1.0))
            } else {
                0.5 * ((-13.0 * FRAC_PI_2 * (2.0 * p)).sin() * 2f32.powf(-10.0 * (2.0 * p - 1.0))
                    + 2.0)
            }
        }

        EasingType::BackEaseIn => back_in(p),
        EasingType::BackEaseOut => {
            let f = 1.0 - p;
            1.0 - back_in(f)
        }
        EasingType::BackEaseInOut => {
            if p < 0.5 {
                0.5 * back_in(2.0 * p)
            } else {
                let f = 1.0 - (2.0 * p - 1.0);
                0.5 * (1.0 - back_in(f)) + 0.5
            }
        }

        EasingType::BounceEaseIn => 1.0 - bounce_out(1.0 - p),
        EasingType::BounceEaseOut => bounce_out(p),
        EasingType::BounceEaseInOut => {
            if p < 0.5 {
                0.5 * (1.0 - bounce_out(1.0 - 2.0 * p))
            } else {
                0.5 * bounce_out(2.0 * p - 1.0) + 0.5
            }
        }
    }
}

#[inline]
fn back_in(p: f32) -> f32 {
    p * p * p - p * (p * PI).sin()
}

fn bounce_out(p: f32) -> f32 {
    if p < 4.0 / 11.0 {
        (121.0 * p * p) / 16.0
    } else if p < 8.0 / 11.0 {
        (363.0 / 40.0 * p * p) - (99.0 / 10.0 * p) + 17.0 / 5.0
    } else if p < 9.0 / 10.0 {
        (4356.0 / 361.0 * p * p) - (35442.0 / 1805.0 * p) + 16061.0 / 1805.0
    } else {
        (54.0 / 5.0 * p * p) - (513.0 / 25.0 * p) + 268.0 / 25.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_out_curves_pass_through_half() {
        for kind in [
            EasingType::QuadraticEaseInOut,
            EasingType::CubicEaseInOut,
            EasingType::QuarticEaseInOut,
            EasingType::QuinticEaseInOut,
            EasingType::SineEaseInOut,
            EasingType::CircularEaseInOut,
            EasingType::ExponentialEaseInOut,
            EasingType::BounceEaseInOut,
        ] {
            assert!((ease_float(0.5, kind) - 0.5).abs() < 1e-4, "{kind:?}");
        }
    }

    #[test]
    fn in_and_out_mirror_each_other() {
        let pairs = [
            (EasingType::CubicEaseIn, EasingType::CubicEaseOut),
            (EasingType::SineEaseIn, EasingType::SineEaseOut),
            (EasingType::BackEaseIn, EasingType::BackEaseOut),
            (EasingType::BounceEaseIn, EasingType::BounceEaseOut),
        ];
        for (ease_in, ease_out) in pairs {
            for step in 0..=10 {
                let p = step as f32 / 10.0;
                let mirrored = 1.0 - ease_float(1.0 - p, ease_in);
                assert!((ease_float(p, ease_out) - mirrored).abs() < 1e-4, "{ease_out:?} at {p}");
            }
        }
    }

    #[test]
    fn out_of_range_input_is_finite() {
        for kind in EasingType::ALL {
            for p in [-0.5f32, 1.5, 3.0] {
                assert!(ease_float(p, kind).is_finite(), "{kind:?} at {p}");
            }
        }
    }

    #[test]
    fn linear_passes_values_through() {
        assert_eq!(ease_float(-0.25, EasingType::Linear), -0.25);
        assert_eq!(ease_float(1.75, EasingType::Linear), 1.75);
    }
}
