//! RBF solver settings.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RigError};
use crate::math::rotation::is_nearly_zero;
use crate::rbf::{DistanceMetric, KernelType, RbfKey, RbfSolveMode, RbfWeightFn};
use crate::value::Vec3;

/// Settings shared by every evaluation of one target set.
///
/// Missing JSON fields take their default, so `{}` is a valid document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RbfSettings {
    pub distance: DistanceMetric,
    pub kernel: KernelType,
    /// Kernel radius for rotation keys, in degrees.
    pub smoothing_angle: f32,
    /// Kernel radius for point keys, in key units.
    pub smoothing_radius: f32,
    /// Axis for the swing/twist metrics.
    pub twist_axis: Vec3,
    pub normalize_weights: bool,
    pub clip_negative_weights: bool,
    pub solve_mode: RbfSolveMode,
}

impl Default for RbfSettings {
    fn default() -> Self {
        Self {
            distance: DistanceMetric::Euclidean,
            kernel: KernelType::Gaussian,
            smoothing_angle: 45.0,
            smoothing_radius: 1.0,
            twist_axis: Vec3::x(),
            normalize_weights: true,
            clip_negative_weights: true,
            solve_mode: RbfSolveMode::Direct,
        }
    }
}

impl RbfSettings {
    /// Parse and validate a JSON settings document.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.smoothing_angle.is_finite() || self.smoothing_angle < 0.0 {
            return Err(RigError::invalid_setting(
                "smoothing_angle",
                format!("must be finite and non-negative, got {}", self.smoothing_angle),
            ));
        }
        if !self.smoothing_radius.is_finite() || self.smoothing_radius < 0.0 {
            return Err(RigError::invalid_setting(
                "smoothing_radius",
                format!("must be finite and non-negative, got {}", self.smoothing_radius),
            ));
        }
        if !self.twist_axis.iter().all(|c| c.is_finite()) {
            return Err(RigError::invalid_setting("twist_axis", "must be finite"));
        }
        if self.distance.uses_twist_axis() && is_nearly_zero(&self.twist_axis) {
            return Err(RigError::invalid_setting(
                "twist_axis",
                format!("must be non-zero for {:?}", self.distance),
            ));
        }
        Ok(())
    }

    /// Kernel radius for rotation keys, in radians.
    pub fn sigma_for_quat(&self) -> f32 {
        sanitize_radius("smoothing_angle", self.smoothing_angle).to_radians()
    }

    pub fn sigma_for_vector(&self) -> f32 {
        sanitize_radius("smoothing_radius", self.smoothing_radius)
    }

    /// Weight function for keys of type `K`.
    pub fn weight_fn<K: RbfKey>(&self) -> RbfWeightFn {
        RbfWeightFn {
            metric: self.distance,
            kernel: self.kernel,
            sigma: K::sigma(self),
            twist_axis: self.twist_axis,
        }
    }
}

/// Unusable radii evaluate as 0, which turns every kernel into an exact-match
/// indicator.
fn sanitize_radius(field: &str, value: f32) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        warn!("rbf settings: {field} = {value} is unusable; treating it as 0");
        0.0
    }
}
