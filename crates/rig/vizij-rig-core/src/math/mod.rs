//! Rig math library.
//!
//! Angles cross the public boundary in degrees only where noted (Euler
//! conversion); everything else works in radians. Functions are total:
//! degenerate input yields a documented fallback instead of NaN or a panic.

pub mod bezier;
pub mod clamp;
pub mod easing;
pub mod euler;
pub mod ik;
pub mod rotation;
pub mod swing_twist;
pub mod tolerance;
pub mod transform;

pub use bezier::{four_point_bezier, FourPointBezier};
pub use clamp::{clamp_spatially, Axis, ClampMode};
pub use easing::{ease_float, EasingType};
pub use euler::{euler_from_quat, quat_from_euler, RotationOrder};
pub use ik::{solve_basic_two_bone_ik, TwoBoneIk, TwoBoneIkResult};
pub use rotation::{
    angle_between, find_quat_between_normals, find_quat_between_vectors, quat_angle,
    quat_from_axis_angle, safe_normalize, slerp_quat,
};
pub use swing_twist::swing_twist_decompose;
pub use transform::lerp_transform;
