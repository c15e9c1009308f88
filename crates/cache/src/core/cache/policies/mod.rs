//! Cache Replacement Policies.
//!
//! Implements the algorithms that choose a victim line when a block must be installed,
//! and the bookkeeping each one performs on hits and fills.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used.
//! - `Mru`: Most Recently Used.
//! - `Random`: Uniform random selection.
//! - `RandomizedMarking`: Random among unmarked lines, phase reset when all are marked.
//!
//! Every policy prefers an invalid line over any valid one. Per-set state (the LRU
//! list and the marks) lives in [`CacheSet`], so the policy objects themselves are
//! stateless.

/// Least Recently Used replacement policy.
pub mod lru;

/// Randomized Marking replacement policy.
pub mod marking;

/// Most Recently Used replacement policy.
pub mod mru;

/// Random replacement policy.
pub mod random;

use std::fmt::Debug;

pub use lru::LruPolicy;
pub use marking::MarkingPolicy;
pub use mru::MruPolicy;
pub use random::RandomPolicy;

use super::set::CacheSet;
use crate::config::ReplacementPolicy as PolicyType;
use crate::rng::RandomSource;

/// Trait for cache replacement policies.
///
/// Defines the interface for hit/fill bookkeeping and victim selection within one set.
pub trait ReplacementPolicy: Debug + Send + Sync {
    /// Updates set state when a lookup hits `way`.
    fn on_hit(&self, set: &mut CacheSet, way: usize);

    /// Updates set state after `way` has been filled with a new block.
    ///
    /// The default promotes the line to the most recently used position, which keeps
    /// invalid lines at the front of the LRU list for every policy.
    fn on_fill(&self, set: &mut CacheSet, way: usize) {
        set.make_mru(way);
    }

    /// Selects the way to fill on a miss.
    ///
    /// # Arguments
    ///
    /// * `set` - The set being filled.
    /// * `rng` - Random source for randomized policies.
    ///
    /// # Returns
    ///
    /// The way to evict. An invalid way is returned whenever one exists.
    fn select_victim(&self, set: &mut CacheSet, rng: &mut dyn RandomSource) -> usize;
}

/// Builds the policy engine for a decoded replacement policy.
pub fn build(kind: PolicyType) -> Box<dyn ReplacementPolicy> {
    match kind {
        PolicyType::Random => Box::new(RandomPolicy),
        PolicyType::Lru => Box::new(LruPolicy),
        PolicyType::Mru => Box::new(MruPolicy),
        PolicyType::RandomizedMarking => Box::new(MarkingPolicy),
    }
}

/// Returns a uniformly chosen index in `0..count` from the injected source.
#[inline]
pub(crate) fn random_index(rng: &mut dyn RandomSource, count: usize) -> usize {
    rng.next_u32() as usize % count
}
