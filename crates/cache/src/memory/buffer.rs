//! Flat memory buffer.
//!
//! A contiguous region of simulated memory starting at a base address. Accesses
//! outside the region panic with the offending address; they indicate a trace that
//! touches memory the caller never provided.

use super::BackingMemory;
use crate::common::constants::WORD_BYTES;

/// A contiguous, zero-initialized region of memory at a fixed base address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlatMemory {
    base: u64,
    bytes: Vec<u8>,
}

impl FlatMemory {
    /// Creates a zero-filled region.
    ///
    /// # Arguments
    ///
    /// * `base` - Address of the first byte.
    /// * `size` - Size of the region in bytes.
    pub fn new(base: u64, size: usize) -> Self {
        Self {
            base,
            bytes: vec![0; size],
        }
    }

    /// Wraps existing contents; the first byte lives at `base`.
    pub const fn from_bytes(base: u64, bytes: Vec<u8>) -> Self {
        Self { base, bytes }
    }

    /// Address of the first byte.
    pub const fn base(&self) -> u64 {
        self.base
    }

    /// Size of the region in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if the region holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The raw contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Copies `data` into the region at `addr` (alias of `write_block`).
    pub fn load(&mut self, addr: u64, data: &[u8]) {
        self.write_block(addr, data);
    }

    /// Reads eight little-endian bytes at `addr`.
    pub fn read_u64(&self, addr: u64) -> u64 {
        let mut word = [0u8; WORD_BYTES];
        self.read_block(addr, &mut word);
        u64::from_le_bytes(word)
    }

    /// Writes eight little-endian bytes at `addr`.
    pub fn write_u64(&mut self, addr: u64, value: u64) {
        self.write_block(addr, &value.to_le_bytes());
    }

    /// Translates an absolute address range into an index range, panicking if it
    /// falls outside the region.
    fn range(&self, addr: u64, len: usize) -> std::ops::Range<usize> {
        let start = addr
            .checked_sub(self.base)
            .and_then(|offset| usize::try_from(offset).ok());
        match start {
            Some(start) if start.checked_add(len).is_some_and(|end| end <= self.bytes.len()) => {
                start..start + len
            }
            _ => panic!(
                "memory access out of bounds: {:#x}+{} outside [{:#x}, {:#x})",
                addr,
                len,
                self.base,
                self.base + self.bytes.len() as u64
            ),
        }
    }
}

impl BackingMemory for FlatMemory {
    fn read_block(&self, addr: u64, buf: &mut [u8]) {
        let range = self.range(addr, buf.len());
        buf.copy_from_slice(&self.bytes[range]);
    }

    fn write_block(&mut self, addr: u64, data: &[u8]) {
        let range = self.range(addr, data.len());
        self.bytes[range].copy_from_slice(data);
    }
}
