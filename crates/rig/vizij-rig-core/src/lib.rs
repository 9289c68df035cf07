//! vizij-rig-core: RBF pose interpolation and rig math.
//!
//! - [`rbf`]: distance metrics, smoothing kernels, the cached interpolator
//!   and weighted value blending.
//! - [`math`]: Euler/quaternion conversion, easing, Bezier evaluation,
//!   two-bone IK, spatial clamping and swing-twist decomposition.
//! - [`config`]: serde-loadable solver settings.
//!
//! Vectors and rotations are `nalgebra` types re-exported from [`value`].

pub mod config;
pub mod error;
pub mod math;
pub mod rbf;
pub mod value;

pub use config::RbfSettings;
pub use error::{Result, RigError};
pub use rbf::{
    rbf_interpolate, DistanceMetric, KernelType, RbfCacheState, RbfInterpolator, RbfSolveMode,
    RbfTarget, RbfWorkData,
};
pub use value::{Color, Quat, Transform, Vec3};
