//! Radial smoothing kernels.

use serde::{Deserialize, Serialize};

use crate::math::tolerance::{LENGTH_EPSILON, SMALL_NUMBER};

/// Kernel shape. Every kernel is 1 at distance 0 and non-increasing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KernelType {
    /// `max(0, 1 - d/σ)`
    Linear,
    /// `exp(-d² / 2σ²)`
    #[default]
    Gaussian,
    /// `exp(-d/σ)`
    Exponential,
    /// `(1 - d/σ)³` inside σ, 0 outside
    Cubic,
    /// `(1 - d/σ)⁵` inside σ, 0 outside
    Quintic,
}

impl KernelType {
    pub const ALL: [KernelType; 5] = [
        KernelType::Linear,
        KernelType::Gaussian,
        KernelType::Exponential,
        KernelType::Cubic,
        KernelType::Quintic,
    ];

    /// Kernel value at `distance` for radius `sigma`.
    ///
    /// A radius at or below zero collapses every kernel to an indicator of
    /// `distance ≈ 0`. A non-finite distance weighs 0.
    pub fn evaluate(self, distance: f32, sigma: f32) -> f32 {
        let d = distance.abs();
        if !d.is_finite() {
            return 0.0;
        }
        if sigma <= SMALL_NUMBER || !sigma.is_finite() {
            return if d <= LENGTH_EPSILON { 1.0 } else { 0.0 };
        }
        let r = d / sigma;
        match self {
            KernelType::Linear => (1.0 - r).max(0.0),
            KernelType::Gaussian => (-0.5 * r * r).exp(),
            KernelType::Exponential => (-r).exp(),
            KernelType::Cubic => (1.0 - r).max(0.0).powi(3),
            KernelType::Quintic => (1.0 - r).max(0.0).powi(5),
        }
    }
}
