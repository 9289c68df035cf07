//! Reuse of built interpolators across evaluations.
//!
//! A caller keeps one [`RbfWorkData`] per evaluation site. While the incoming
//! target keys keep hashing the same, the interpolator (and any exact-mode
//! matrix inverse) is reused. Once the keys are seen to change, the site is
//! assumed to be animated and rebuilds on every call without hashing.

use log::debug;
use serde::{Deserialize, Serialize};

use super::distance::RbfKey;
use super::hash::hash_targets;
use super::interpolator::{RbfInterpolator, RbfSolveMode, RbfWeightFn};
use super::RbfTarget;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RbfCacheState {
    /// Nothing built yet.
    #[default]
    Empty,
    /// Built once; reused while the key hash matches.
    Cached,
    /// Keys changed at least once; rebuild on every call.
    AlwaysRebuild,
}

/// Build/reuse counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RbfCacheMetrics {
    pub builds: u64,
    pub reuses: u64,
}

impl RbfCacheMetrics {
    pub fn total(&self) -> u64 {
        self.builds + self.reuses
    }
}

#[derive(Clone, Debug)]
pub struct RbfWorkData<K> {
    state: RbfCacheState,
    interpolator: Option<RbfInterpolator<K, RbfWeightFn>>,
    weights: Vec<f32>,
    metrics: RbfCacheMetrics,
}

impl<K> Default for RbfWorkData<K> {
    fn default() -> Self {
        Self {
            state: RbfCacheState::Empty,
            interpolator: None,
            weights: Vec::new(),
            metrics: RbfCacheMetrics::default(),
        }
    }
}

impl<K> RbfWorkData<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RbfCacheState {
        self.state
    }

    pub fn metrics(&self) -> RbfCacheMetrics {
        self.metrics
    }

    pub fn interpolator(&self) -> Option<&RbfInterpolator<K, RbfWeightFn>> {
        self.interpolator.as_ref()
    }

    /// Weights from the most recent [`update_weights`](Self::update_weights).
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Drop the cached interpolator and return to [`RbfCacheState::Empty`].
    /// Counters are kept.
    pub fn reset(&mut self) {
        debug!("rbf cache: reset from {:?}", self.state);
        self.state = RbfCacheState::Empty;
        self.interpolator = None;
        self.weights.clear();
    }
}

impl<K: RbfKey> RbfWorkData<K> {
    /// Make sure an interpolator for `targets` is available. Returns `true`
    /// when it had to be (re)built.
    pub fn prepare<V>(
        &mut self,
        targets: &[RbfTarget<K, V>],
        weight_fn: RbfWeightFn,
        mode: RbfSolveMode,
    ) -> bool {
        let rebuild = match (&self.interpolator, self.state) {
            (Some(current), RbfCacheState::Cached) => {
                let hash = hash_targets(targets);
                if !current.matches(hash) {
                    debug!(
                        "rbf cache: target keys changed ({:#018x} -> {hash:#018x}); switching to always-rebuild",
                        current.hash()
                    );
                    self.state = RbfCacheState::AlwaysRebuild;
                    true
                } else {
                    *current.weight_fn() != weight_fn || current.requested_mode() != mode
                }
            }
            (Some(_), RbfCacheState::AlwaysRebuild) => true,
            _ => {
                self.state = RbfCacheState::Cached;
                true
            }
        };

        if rebuild {
            self.interpolator = Some(RbfInterpolator::from_targets(targets, weight_fn, mode));
            self.metrics.builds += 1;
        } else {
            self.metrics.reuses += 1;
        }
        rebuild
    }

    /// Prepare for `targets` and compute weights for `query`.
    pub fn update_weights<V>(
        &mut self,
        targets: &[RbfTarget<K, V>],
        query: &K,
        weight_fn: RbfWeightFn,
        mode: RbfSolveMode,
        clip: bool,
        normalize: bool,
    ) -> &[f32] {
        self.prepare(targets, weight_fn, mode);
        self.weights.clear();
        if let Some(interpolator) = &self.interpolator {
            interpolator.interpolate_into(query, clip, normalize, &mut self.weights);
        }
        &self.weights
    }
}
