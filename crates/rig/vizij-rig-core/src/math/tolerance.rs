//! Shared tolerances for degenerate-case checks.
//!
//! Every near-zero comparison in the crate goes through one of these so that
//! the fallback thresholds stay consistent between modules.

/// Vectors and quaternions whose length is at or below this are treated as zero.
pub const LENGTH_EPSILON: f32 = 1.0e-4;

/// Denominators at or below this are treated as zero.
pub const SMALL_NUMBER: f32 = 1.0e-8;

/// RBF weight sums at or below this are left unnormalized.
pub const WEIGHT_EPSILON: f32 = 1.0e-6;

/// Distance from ±1 at which an Euler extraction is treated as gimbal locked.
pub const GIMBAL_EPSILON: f64 = 1.0e-6;

/// Quaternion dot products above this blend with NLERP instead of SLERP.
pub const SLERP_DOT_THRESHOLD: f32 = 0.9995;
