//! Randomized Marking Replacement Policy.
//!
//! The online paging algorithm of Fiat et al., applied per set. Every line touched by
//! a hit or a fill is marked. On a miss with no invalid line, the victim is chosen
//! uniformly among the unmarked lines; if every line is marked, all marks are cleared
//! first (a new phase) and the choice is made over the whole set. The victim is marked
//! once filled, so right after a phase reset exactly one line is marked.
//!
//! Against an oblivious adversary the policy is `O(log k)`-competitive for a set of
//! `k` ways.

use super::{ReplacementPolicy, random_index};
use crate::core::cache::set::CacheSet;
use crate::rng::RandomSource;

/// Randomized Marking policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct MarkingPolicy;

impl ReplacementPolicy for MarkingPolicy {
    fn on_hit(&self, set: &mut CacheSet, way: usize) {
        set.mark(way);
    }

    fn on_fill(&self, set: &mut CacheSet, way: usize) {
        set.make_mru(way);
        set.mark(way);
    }

    /// Returns the first invalid way, else a random unmarked way, starting a new phase
    /// when none is unmarked.
    fn select_victim(&self, set: &mut CacheSet, rng: &mut dyn RandomSource) -> usize {
        if let Some(way) = set.first_invalid() {
            return way;
        }
        if set.unmarked_count() == 0 {
            set.clear_marks();
        }
        let choice = random_index(rng, set.unmarked_count());
        set.nth_unmarked(choice).unwrap_or(0)
    }
}
