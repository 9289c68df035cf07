use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use super::distance::RbfKey;
use super::RbfTarget;

/// Hash a float so that `+0.0`/`-0.0` collide and every NaN collides.
pub fn hash_f32(value: f32, state: &mut impl Hasher) {
    if value.is_nan() {
        // Hash all NaN values the same way
        u32::MAX.hash(state);
    } else if value == 0.0 {
        0u32.hash(state);
    } else {
        value.to_bits().hash(state);
    }
}

/// Content hash of an ordered key list. Order matters.
pub fn hash_keys<'a, K, I>(keys: I) -> u64
where
    K: RbfKey + 'a,
    I: IntoIterator<Item = &'a K>,
{
    let mut hasher = DefaultHasher::new();
    let mut count = 0usize;
    for key in keys {
        key.hash_into(&mut hasher);
        count += 1;
    }
    count.hash(&mut hasher);
    hasher.finish()
}

/// Hash of the keys of a target list; values are not part of it.
pub fn hash_targets<K: RbfKey, V>(targets: &[RbfTarget<K, V>]) -> u64 {
    hash_keys(targets.iter().map(|t| &t.key))
}
