//! Random Replacement Policy.
//!
//! This policy evicts a uniformly chosen line once the set is full. The random number
//! comes from the caller's source, reduced modulo the associativity, so a fixed
//! source sequence replays the same evictions.

use super::{ReplacementPolicy, random_index};
use crate::core::cache::set::CacheSet;
use crate::rng::RandomSource;

/// Random policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomPolicy;

impl ReplacementPolicy for RandomPolicy {
    /// Access patterns do not affect random replacement, so this is a no-op.
    fn on_hit(&self, _set: &mut CacheSet, _way: usize) {}

    /// Returns the first invalid way, else a random way. The source is only consulted
    /// when the set is full.
    fn select_victim(&self, set: &mut CacheSet, rng: &mut dyn RandomSource) -> usize {
        match set.first_invalid() {
            Some(way) => way,
            None => random_index(rng, set.associativity()),
        }
    }
}
