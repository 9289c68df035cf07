//! Weight computation over a cached key set.

use log::{debug, warn};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use super::distance::{DistanceMetric, RbfKey};
use super::hash::hash_keys;
use super::kernel::KernelType;
use super::RbfTarget;
use crate::math::tolerance::WEIGHT_EPSILON;
use crate::value::Vec3;

/// Largest entry of `G · G⁻¹ - I` accepted for an exact solve.
const EXACT_RESIDUAL_TOLERANCE: f64 = 1.0e-6;

/// How raw kernel values become target weights.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RbfSolveMode {
    /// Weight of a target is its kernel value at the query.
    #[default]
    Direct,
    /// Kernel values are mapped through the inverse of the key-to-key kernel
    /// matrix so each key reproduces its own target exactly.
    Exact,
}

/// Similarity between a stored key and the query.
pub trait WeightFunction<K> {
    fn weight(&self, key: &K, query: &K) -> f32;
}

/// Metric + kernel weight function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RbfWeightFn {
    pub metric: DistanceMetric,
    pub kernel: KernelType,
    pub sigma: f32,
    pub twist_axis: Vec3,
}

impl<K: RbfKey> WeightFunction<K> for RbfWeightFn {
    #[inline]
    fn weight(&self, key: &K, query: &K) -> f32 {
        let d = key.distance(query, self.metric, &self.twist_axis);
        self.kernel.evaluate(d, self.sigma)
    }
}

/// Adapter for closures.
#[derive(Clone, Copy, Debug)]
pub struct FnWeight<F>(pub F);

impl<K, F> WeightFunction<K> for FnWeight<F>
where
    F: Fn(&K, &K) -> f32,
{
    #[inline]
    fn weight(&self, key: &K, query: &K) -> f32 {
        (self.0)(key, query)
    }
}

#[derive(Clone, Debug)]
pub struct RbfInterpolator<K, W> {
    keys: Vec<K>,
    hash: u64,
    weight_fn: W,
    requested_mode: RbfSolveMode,
    /// Inverse kernel matrix; `None` in direct mode or after a failed solve.
    inverse: Option<DMatrix<f64>>,
}

impl<K: RbfKey, W: WeightFunction<K>> RbfInterpolator<K, W> {
    /// Direct-mode interpolator over `keys`.
    pub fn build(keys: Vec<K>, weight_fn: W) -> Self {
        Self::build_with_mode(keys, weight_fn, RbfSolveMode::Direct)
    }

    pub fn build_with_mode(keys: Vec<K>, weight_fn: W, mode: RbfSolveMode) -> Self {
        let hash = hash_keys(&keys);
        let inverse = match mode {
            RbfSolveMode::Direct => None,
            RbfSolveMode::Exact => solve_exact(&keys, &weight_fn),
        };
        debug!(
            "rbf: built interpolator over {} keys (hash {hash:#018x}, mode {mode:?}, exact {})",
            keys.len(),
            inverse.is_some()
        );
        Self {
            keys,
            hash,
            weight_fn,
            requested_mode: mode,
            inverse,
        }
    }

    /// Build from the keys of a target list.
    pub fn from_targets<V>(targets: &[RbfTarget<K, V>], weight_fn: W, mode: RbfSolveMode) -> Self {
        let keys = targets.iter().map(|t| t.key.clone()).collect();
        Self::build_with_mode(keys, weight_fn, mode)
    }

    /// Weights for `query`, one per stored key, in key order.
    pub fn interpolate(&self, query: &K, clip: bool, normalize: bool) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.keys.len());
        self.interpolate_into(query, clip, normalize, &mut out);
        out
    }

    /// Like [`interpolate`](Self::interpolate) but reuses `out`.
    pub fn interpolate_into(&self, query: &K, clip: bool, normalize: bool, out: &mut Vec<f32>) {
        out.clear();
        out.extend(self.keys.iter().map(|k| self.weight_fn.weight(k, query)));

        if let Some(inverse) = &self.inverse {
            let raw: Vec<f64> = out.iter().map(|w| f64::from(*w)).collect();
            for (i, slot) in out.iter_mut().enumerate() {
                let row = inverse.row(i);
                *slot = row.iter().zip(&raw).map(|(a, b)| a * b).sum::<f64>() as f32;
            }
        }

        if clip {
            for w in out.iter_mut() {
                if *w < 0.0 {
                    *w = 0.0;
                }
            }
        }

        if normalize {
            let total: f32 = out.iter().sum();
            if total > WEIGHT_EPSILON {
                for w in out.iter_mut() {
                    *w /= total;
                }
            }
        }
    }
}

impl<K, W> RbfInterpolator<K, W> {
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Content hash of the stored keys.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    pub fn matches(&self, hash: u64) -> bool {
        self.hash == hash
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn weight_fn(&self) -> &W {
        &self.weight_fn
    }

    pub fn requested_mode(&self) -> RbfSolveMode {
        self.requested_mode
    }

    /// Mode actually in effect; exact falls back to direct when the kernel
    /// matrix could not be inverted.
    pub fn solve_mode(&self) -> RbfSolveMode {
        if self.inverse.is_some() {
            RbfSolveMode::Exact
        } else {
            RbfSolveMode::Direct
        }
    }
}

fn solve_exact<K, W: WeightFunction<K>>(keys: &[K], weight_fn: &W) -> Option<DMatrix<f64>> {
    let n = keys.len();
    if n == 0 {
        return None;
    }
    let gram = DMatrix::from_fn(n, n, |i, j| f64::from(weight_fn.weight(&keys[i], &keys[j])));
    let Some(inverse) = gram.clone().try_inverse() else {
        warn!("rbf: kernel matrix over {n} keys is singular; using direct weights");
        return None;
    };
    let residual = (&gram * &inverse - DMatrix::<f64>::identity(n, n)).amax();
    if !residual.is_finite() || residual > EXACT_RESIDUAL_TOLERANCE {
        warn!(
            "rbf: kernel matrix over {n} keys is ill-conditioned (residual {residual:e}); using direct weights"
        );
        return None;
    }
    Some(inverse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Quat;
    use approx::assert_relative_eq;

    fn gaussian(sigma: f32) -> RbfWeightFn {
        RbfWeightFn {
            metric: DistanceMetric::Euclidean,
            kernel: KernelType::Gaussian,
            sigma,
            twist_axis: Vec3::x(),
        }
    }

    #[test]
    fn empty_key_set_gives_empty_weights() {
        let interp = RbfInterpolator::<Vec3, _>::build(Vec::new(), gaussian(1.0));
        assert!(interp.is_empty());
        assert!(interp.interpolate(&Vec3::x(), true, true).is_empty());
    }

    #[test]
    fn normalized_weights_sum_to_one() {
        let keys = vec![Vec3::x(), Vec3::y(), Vec3::z()];
        let interp = RbfInterpolator::build(keys, gaussian(1.0));
        let w = interp.interpolate(&Vec3::new(0.3, 0.2, 0.1), true, true);
        assert_relative_eq!(w.iter().sum::<f32>(), 1.0, epsilon = 1e-6);
        assert!(w[0] > w[1] && w[1] > w[2]);
    }

    #[test]
    fn tiny_sums_stay_unnormalized() {
        let keys = vec![Vec3::zeros()];
        let weight = RbfWeightFn {
            kernel: KernelType::Linear,
            ..gaussian(1.0)
        };
        let interp = RbfInterpolator::build(keys, weight);
        assert_eq!(interp.interpolate(&Vec3::new(5.0, 0.0, 0.0), true, true), vec![0.0]);
    }

    #[test]
    fn clip_removes_negative_weights() {
        let interp = RbfInterpolator::build(
            vec![Vec3::zeros(), Vec3::x()],
            FnWeight(|k: &Vec3, q: &Vec3| if k == q { 1.0 } else { -0.5 }),
        );
        assert_eq!(interp.interpolate(&Vec3::zeros(), false, false), vec![1.0, -0.5]);
        assert_eq!(interp.interpolate(&Vec3::zeros(), true, false), vec![1.0, 0.0]);
    }

    #[test]
    fn exact_mode_reproduces_keys() {
        let keys = vec![
            Quat::identity(),
            Quat::from_axis_angle(&Vec3::z_axis(), 0.8),
            Quat::from_axis_angle(&Vec3::x_axis(), 0.8),
        ];
        let weight = RbfWeightFn {
            metric: DistanceMetric::ArcLength,
            ..gaussian(0.6)
        };
        let interp =
            RbfInterpolator::build_with_mode(keys.clone(), weight, RbfSolveMode::Exact);
        assert_eq!(interp.solve_mode(), RbfSolveMode::Exact);
        for (j, key) in keys.iter().enumerate() {
            let w = interp.interpolate(key, false, false);
            for (i, wi) in w.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(*wi, expected, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn duplicate_keys_fall_back_to_direct() {
        let keys = vec![Vec3::x(), Vec3::x()];
        let interp = RbfInterpolator::build_with_mode(keys, gaussian(1.0), RbfSolveMode::Exact);
        assert_eq!(interp.requested_mode(), RbfSolveMode::Exact);
        assert_eq!(interp.solve_mode(), RbfSolveMode::Direct);
    }
}
