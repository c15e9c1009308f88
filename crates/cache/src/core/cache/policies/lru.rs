//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the line that has not been accessed for the longest time.
//! Each set keeps an LRU list of way indices; on every hit or fill the touched way
//! moves to the last position (most recently used) and the entries after it shift
//! down. The victim is always `lru_list[0]`.
//!
//! Because fills append to the end and nothing else moves a line forward, invalid
//! lines stay at the front of the list, so no separate scan for invalid lines is
//! needed.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_hit()` / `on_fill()`: O(W) where W is the number of ways (associativity)
//!   - `select_victim()`: O(1)
//! - **Space Complexity:** O(S × W) where S is the number of sets
//! - **Best Case:** Workloads with good temporal locality
//! - **Worst Case:** Cyclic scans slightly larger than a set (thrashing)

use super::ReplacementPolicy;
use crate::core::cache::set::CacheSet;
use crate::rng::RandomSource;

/// LRU policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct LruPolicy;

impl ReplacementPolicy for LruPolicy {
    /// Promotes the hit way to the most recently used position.
    fn on_hit(&self, set: &mut CacheSet, way: usize) {
        set.make_mru(way);
    }

    /// Returns the way at the front of the LRU list.
    fn select_victim(&self, set: &mut CacheSet, _rng: &mut dyn RandomSource) -> usize {
        set.lru_list()[0]
    }
}
