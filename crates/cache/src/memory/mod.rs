//! Backing memory.
//!
//! The cache sits in front of a flat, byte-addressed memory. Fills copy a whole block
//! out of it; write-through stores and write-backs copy bytes into it. This module
//! provides:
//! 1. **Interface:** The [`BackingMemory`] trait the cache talks to.
//! 2. **Implementation:** [`FlatMemory`], a vector-backed region at a base address.

/// Vector-backed flat memory.
pub mod buffer;

pub use buffer::FlatMemory;

/// Byte-addressed memory behind the cache.
///
/// Addresses are absolute simulated addresses. An implementation may panic on an
/// address it does not back; the cache treats that as a caller bug, like a bus error.
pub trait BackingMemory {
    /// Copies `buf.len()` bytes starting at `addr` into `buf`.
    fn read_block(&self, addr: u64, buf: &mut [u8]);

    /// Copies `data` into memory starting at `addr`.
    fn write_block(&mut self, addr: u64, data: &[u8]);
}

impl<M: BackingMemory + ?Sized> BackingMemory for &mut M {
    #[inline]
    fn read_block(&self, addr: u64, buf: &mut [u8]) {
        (**self).read_block(addr, buf);
    }

    #[inline]
    fn write_block(&mut self, addr: u64, data: &[u8]) {
        (**self).write_block(addr, data);
    }
}
