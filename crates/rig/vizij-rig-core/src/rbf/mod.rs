//! Radial basis function interpolation of poses and values.
//!
//! A target set pairs keys (rotations or points) with output values. For a
//! query key the [`RbfInterpolator`] weighs every target by a smoothing
//! kernel of its distance to the query, and [`blend`] forms the output as a
//! weighted combination of the target values. [`rbf_interpolate`] ties the
//! pieces together around a reusable [`RbfWorkData`] cache.

pub mod blend;
pub mod cache;
pub mod distance;
pub mod hash;
pub mod interpolator;
pub mod kernel;

use serde::{Deserialize, Serialize};

use crate::config::RbfSettings;

pub use blend::{blend_weighted, QuatAccumulator, WeightedBlend};
pub use cache::{RbfCacheMetrics, RbfCacheState, RbfWorkData};
pub use distance::{quat_distance, vector_distance, DistanceMetric, RbfKey};
pub use hash::{hash_keys, hash_targets};
pub use interpolator::{FnWeight, RbfInterpolator, RbfSolveMode, RbfWeightFn, WeightFunction};
pub use kernel::KernelType;

/// One key/value sample.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RbfTarget<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> RbfTarget<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

/// Evaluate a target set at `query`.
///
/// The interpolator in `work` is rebuilt or reused according to its cache
/// state. An empty target list yields [`WeightedBlend::neutral`] and leaves
/// `work` untouched.
pub fn rbf_interpolate<K, V>(
    targets: &[RbfTarget<K, V>],
    query: &K,
    settings: &RbfSettings,
    work: &mut RbfWorkData<K>,
) -> V
where
    K: RbfKey,
    V: WeightedBlend,
{
    if targets.is_empty() {
        return V::neutral();
    }
    let weights = work.update_weights(
        targets,
        query,
        settings.weight_fn::<K>(),
        settings.solve_mode,
        settings.clip_negative_weights,
        settings.normalize_weights,
    );
    blend_weighted(targets.iter().map(|t| &t.value).zip(weights.iter().copied()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Quat, Vec3};
    use approx::assert_relative_eq;

    #[test]
    fn empty_targets_give_neutral_value() {
        let mut work = RbfWorkData::<Quat>::new();
        let out: f32 = rbf_interpolate(&[], &Quat::identity(), &RbfSettings::default(), &mut work);
        assert_eq!(out, 0.0);
        assert_eq!(work.state(), RbfCacheState::Empty);
    }

    #[test]
    fn query_on_key_returns_its_value() {
        let targets = vec![
            RbfTarget::new(Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0)),
            RbfTarget::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
        ];
        let settings = RbfSettings {
            smoothing_radius: 1.0,
            ..RbfSettings::default()
        };
        let mut work = RbfWorkData::new();
        let out = rbf_interpolate(&targets, &Vec3::zeros(), &settings, &mut work);
        assert_relative_eq!(out, Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn nan_key_contributes_nothing() {
        let targets = vec![
            RbfTarget::new(Vec3::new(f32::NAN, 0.0, 0.0), 100.0f32),
            RbfTarget::new(Vec3::zeros(), 2.0),
        ];
        let mut work = RbfWorkData::new();
        let out = rbf_interpolate(&targets, &Vec3::zeros(), &RbfSettings::default(), &mut work);
        assert_relative_eq!(out, 2.0, epsilon = 1e-6);
    }
}
