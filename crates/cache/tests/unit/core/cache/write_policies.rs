//! # Write Policy Tests
//!
//! The four combinations of write-through/write-back with write-allocate/no-allocate,
//! on hits and on misses, plus write-back of dirty victims.

use crate::common::harness::TestContext;
use dcsim_core::common::constants::{
    REPLACEMENT_LRU, WRITE_ALLOCATE, WRITE_BACK, WRITE_NO_ALLOCATE, WRITE_THROUGH,
};
use rstest::rstest;

const VALUE: u64 = 0x0123_4567_89AB_CDEF;

// ══════════════════════════════════════════════════════════
// 1. Write-through
// ══════════════════════════════════════════════════════════

#[test]
fn write_through_allocate_miss_fills_and_writes_memory() {
    let mut ctx = TestContext::small(REPLACEMENT_LRU | WRITE_THROUGH | WRITE_ALLOCATE);
    ctx.write(0x108, VALUE);

    assert_eq!((ctx.cache.access_count(), ctx.cache.miss_count()), (1, 1));
    assert_eq!(ctx.memory.read_u64(0x108), VALUE);

    let line = ctx.cache.line_for(0x108).expect("write-allocate should fill");
    assert!(!line.is_dirty());
    assert_eq!(line.retrieve(8), VALUE);
    assert!(ctx.read_hits(0x108));
}

#[test]
fn write_through_no_allocate_miss_bypasses_cache() {
    let mut ctx = TestContext::small(REPLACEMENT_LRU | WRITE_THROUGH | WRITE_NO_ALLOCATE);
    ctx.write(0x108, VALUE);

    assert_eq!((ctx.cache.access_count(), ctx.cache.miss_count()), (1, 1));
    assert_eq!(ctx.memory.read_u64(0x108), VALUE);
    assert!(!ctx.cache.probe(0x108));
}

#[rstest]
#[case::allocate(WRITE_ALLOCATE)]
#[case::no_allocate(WRITE_NO_ALLOCATE)]
fn write_through_hit_updates_line_and_memory(#[case] allocate: u8) {
    let mut ctx = TestContext::small(REPLACEMENT_LRU | WRITE_THROUGH | allocate);
    ctx.read(0x100);
    ctx.write(0x100, VALUE);

    assert_eq!(ctx.cache.miss_count(), 1);
    assert_eq!(ctx.memory.read_u64(0x100), VALUE);
    let line = ctx.cache.line_for(0x100).expect("line stays cached");
    assert!(!line.is_dirty());
    assert_eq!(ctx.read(0x100), VALUE);
}

// ══════════════════════════════════════════════════════════
// 2. Write-back
// ══════════════════════════════════════════════════════════

#[test]
fn write_back_allocate_miss_leaves_memory_stale() {
    let mut ctx = TestContext::small(REPLACEMENT_LRU | WRITE_BACK | WRITE_ALLOCATE);
    let original = ctx.memory.read_u64(0x100);
    ctx.write(0x100, VALUE);

    assert_eq!((ctx.cache.access_count(), ctx.cache.miss_count()), (1, 1));
    assert_eq!(ctx.memory.read_u64(0x100), original);
    assert!(ctx.cache.line_for(0x100).is_some_and(|line| line.is_dirty()));
    assert_eq!(ctx.read(0x100), VALUE);
}

#[test]
fn write_back_no_allocate_miss_writes_memory_only() {
    let mut ctx = TestContext::small(REPLACEMENT_LRU | WRITE_BACK | WRITE_NO_ALLOCATE);
    ctx.write(0x100, VALUE);

    assert_eq!(ctx.memory.read_u64(0x100), VALUE);
    assert!(!ctx.cache.probe(0x100));
}

#[rstest]
#[case::allocate(WRITE_ALLOCATE)]
#[case::no_allocate(WRITE_NO_ALLOCATE)]
fn write_back_hit_marks_dirty(#[case] allocate: u8) {
    let mut ctx = TestContext::small(REPLACEMENT_LRU | WRITE_BACK | allocate);
    let original = ctx.read(0x100);
    ctx.write(0x100, VALUE);

    assert_eq!(ctx.memory.read_u64(0x100), original);
    assert!(ctx.cache.line_for(0x100).is_some_and(|line| line.is_dirty()));
    assert_eq!(ctx.read(0x100), VALUE);
}

#[test]
fn dirty_victim_is_written_back_on_eviction() {
    let mut ctx = TestContext::small(REPLACEMENT_LRU | WRITE_BACK);
    ctx.write(0x000, VALUE);
    ctx.read(0x200);
    ctx.read(0x400);

    assert!(!ctx.cache.probe(0x000));
    assert_eq!(ctx.memory.read_u64(0x000), VALUE);
    assert_eq!(ctx.read(0x000), VALUE);
}

#[test]
fn clean_victim_is_not_written_back() {
    let mut ctx = TestContext::small(REPLACEMENT_LRU | WRITE_BACK);
    let snapshot = ctx.memory.clone();
    for addr in [0x000, 0x200, 0x400, 0x600] {
        ctx.read(addr);
    }

    assert_eq!(ctx.memory, snapshot);
}

#[test]
fn partial_overwrite_keeps_neighbouring_bytes() {
    let mut ctx = TestContext::small(REPLACEMENT_LRU | WRITE_BACK);
    let neighbour = ctx.memory.read_u64(0x108);
    ctx.write(0x100, VALUE);
    ctx.write(0x104, 0);

    assert_eq!(ctx.read(0x100), VALUE & 0xFFFF_FFFF);
    assert_eq!(ctx.read(0x108) & !0xFFFF_FFFF, neighbour & !0xFFFF_FFFF);
    assert_eq!(ctx.read(0x108) & 0xFFFF_FFFF, 0);
}

/// Write hits update replacement state exactly like read hits.
#[test]
fn write_hit_promotes_under_lru() {
    let mut ctx = TestContext::small(REPLACEMENT_LRU | WRITE_BACK);
    ctx.read(0x000);
    ctx.read(0x200);
    ctx.write(0x000, VALUE);
    ctx.read(0x400);

    assert!(ctx.cache.probe(0x000));
    assert!(!ctx.cache.probe(0x200));
}
