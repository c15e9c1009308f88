//! Most Recently Used (MRU) Replacement Policy.
//!
//! This policy evicts the line that was filled most recently. While counter-intuitive
//! for standard workloads, MRU suits cyclic access patterns larger than the cache:
//! the newest block is the one least likely to be needed again soon.
//!
//! Hits do not reorder the LRU list; only fills promote a way to the last position,
//! which is where the next victim is taken from once the set holds no invalid line.

use super::ReplacementPolicy;
use crate::core::cache::set::CacheSet;
use crate::rng::RandomSource;

/// MRU policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct MruPolicy;

impl ReplacementPolicy for MruPolicy {
    fn on_hit(&self, _set: &mut CacheSet, _way: usize) {}

    /// Returns the first invalid way, else the way at the end of the LRU list.
    fn select_victim(&self, set: &mut CacheSet, _rng: &mut dyn RandomSource) -> usize {
        set.first_invalid()
            .unwrap_or_else(|| set.lru_list()[set.associativity() - 1])
    }
}
