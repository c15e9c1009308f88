//! # Replacement Policy Tests
//!
//! Victim choice and per-set bookkeeping for each policy, observed through the
//! read-only set view. Most cases use a single fully associative set of four ways
//! holding blocks `0x00`, `0x10`, `0x20`, `0x30` in ways 0-3.

use crate::common::harness::TestContext;
use crate::common::mocks::rng::scripted;
use dcsim_core::common::constants::{
    REPLACEMENT_LRU, REPLACEMENT_MRU, REPLACEMENT_RANDOM, REPLACEMENT_RANDOMIZED_MARKING,
};
use pretty_assertions::assert_eq;

/// A 4-way, single-set cache with ways 0-3 filled in order.
fn filled_set(policy: u8) -> TestContext {
    let mut ctx = TestContext::new(64, 16, 4, policy);
    for addr in [0x00, 0x10, 0x20, 0x30] {
        ctx.read(addr);
    }
    ctx
}

fn lru_list(ctx: &TestContext) -> Vec<usize> {
    ctx.cache.set(0).lru_list().to_vec()
}

// ══════════════════════════════════════════════════════════
// 1. LRU
// ══════════════════════════════════════════════════════════

#[test]
fn lru_fills_promote_in_order() {
    let ctx = filled_set(REPLACEMENT_LRU);
    assert_eq!(lru_list(&ctx), vec![0, 1, 2, 3]);
}

#[test]
fn lru_hit_moves_way_to_back() {
    let mut ctx = filled_set(REPLACEMENT_LRU);
    ctx.read(0x00);
    assert_eq!(lru_list(&ctx), vec![1, 2, 3, 0]);

    assert!(!ctx.read_hits(0x40));
    assert_eq!(ctx.way_of(0x40), Some(1), "way 1 (0x10) was least recent");
    assert_eq!(lru_list(&ctx), vec![2, 3, 0, 1]);
}

#[test]
fn lru_hit_on_most_recent_is_stable() {
    let mut ctx = filled_set(REPLACEMENT_LRU);
    ctx.read(0x30);
    assert_eq!(lru_list(&ctx), vec![0, 1, 2, 3]);
}

// ══════════════════════════════════════════════════════════
// 2. MRU
// ══════════════════════════════════════════════════════════

#[test]
fn mru_hits_do_not_reorder() {
    let mut ctx = filled_set(REPLACEMENT_MRU);
    ctx.read(0x00);
    assert_eq!(lru_list(&ctx), vec![0, 1, 2, 3]);
}

#[test]
fn mru_keeps_replacing_the_newest_way() {
    let mut ctx = filled_set(REPLACEMENT_MRU);
    ctx.read(0x00);

    ctx.read(0x40);
    assert_eq!(ctx.way_of(0x40), Some(3));
    ctx.read(0x50);
    assert_eq!(ctx.way_of(0x50), Some(3));
    assert!(!ctx.cache.probe(0x40));

    for addr in [0x00, 0x10, 0x20] {
        assert!(ctx.cache.probe(addr));
    }
}

// ══════════════════════════════════════════════════════════
// 3. Random
// ══════════════════════════════════════════════════════════

#[test]
fn random_victim_is_value_modulo_ways() {
    let mut ctx = TestContext::small(REPLACEMENT_RANDOM);
    let mut rng = scripted(&[3, 4]);
    for addr in [0x000, 0x200, 0x400, 0x600] {
        ctx.cache.read(&mut ctx.memory, addr, &mut rng);
    }

    // 3 % 2 evicted way 1 (0x200); 4 % 2 then evicted way 0 (0x000).
    assert_eq!(ctx.way_of(0x400), Some(1));
    assert_eq!(ctx.way_of(0x600), Some(0));
    assert_eq!(ctx.cache.miss_count(), 4);
}

#[test]
fn random_hits_leave_state_alone() {
    let mut ctx = filled_set(REPLACEMENT_RANDOM);
    let before = ctx.cache.set(0).clone();
    ctx.read(0x10);
    assert_eq!(ctx.cache.set(0), &before);
}

// ══════════════════════════════════════════════════════════
// 4. Randomized Marking
// ══════════════════════════════════════════════════════════

#[test]
fn marking_tracks_marks_across_phases() {
    let mut ctx = filled_set(REPLACEMENT_RANDOMIZED_MARKING);
    let mut rng = scripted(&[2, 1, 0]);
    let set = |ctx: &TestContext| ctx.cache.set(0).clone();
    assert_eq!(set(&ctx).num_marked(), 4);

    // All marked: new phase, index 2 of four unmarked lines is way 2.
    ctx.cache.read(&mut ctx.memory, 0x40, &mut rng);
    assert_eq!(ctx.way_of(0x40), Some(2));
    assert_eq!(set(&ctx).num_marked(), 1);

    // Unmarked ways are 0, 1, 3; index 1 is way 1.
    ctx.cache.read(&mut ctx.memory, 0x50, &mut rng);
    assert_eq!(ctx.way_of(0x50), Some(1));
    assert_eq!(set(&ctx).num_marked(), 2);

    // A hit marks without consulting the source.
    ctx.cache.read(&mut ctx.memory, 0x00, &mut rng);
    assert_eq!(set(&ctx).num_marked(), 3);

    // Only way 3 is unmarked.
    ctx.cache.read(&mut ctx.memory, 0x60, &mut rng);
    assert_eq!(ctx.way_of(0x60), Some(3));
    assert_eq!(set(&ctx).num_marked(), 4);

    // Next phase; the source wraps back to 2.
    ctx.cache.read(&mut ctx.memory, 0x70, &mut rng);
    assert_eq!(ctx.way_of(0x70), Some(2));
    assert_eq!(set(&ctx).num_marked(), 1);
}

#[test]
fn marking_count_matches_marked_lines() {
    let mut ctx = filled_set(REPLACEMENT_RANDOMIZED_MARKING);
    for addr in [0x00, 0x00, 0x40, 0x10, 0x50, 0x50] {
        ctx.read(addr);
        let set = ctx.cache.set(0);
        let marked = set.lines().iter().filter(|line| line.is_marked()).count();
        assert_eq!(set.num_marked(), marked);
        assert_eq!(set.unmarked_count(), 4 - marked);
    }
}

#[test]
fn non_marking_policies_never_mark() {
    for policy in [REPLACEMENT_LRU, REPLACEMENT_MRU, REPLACEMENT_RANDOM] {
        let mut ctx = filled_set(policy);
        ctx.read(0x00);
        ctx.read(0x40);
        assert_eq!(ctx.cache.set(0).num_marked(), 0);
        assert!(ctx.cache.set(0).lines().iter().all(|line| !line.is_marked()));
    }
}
