//! Cache line storage.

use crate::common::constants::WORD_BYTES;

/// One line of a set: a block of bytes plus its metadata bits.
///
/// The tag is meaningless while the line is invalid. `dirty` is only ever set under
/// write-back and `marked` only under Randomized Marking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheLine {
    pub(crate) valid: bool,
    pub(crate) dirty: bool,
    pub(crate) marked: bool,
    pub(crate) tag: u64,
    block: Box<[u8]>,
}

impl CacheLine {
    /// Creates an invalid line with a zeroed block of `line_size` bytes.
    pub(crate) fn new(line_size: usize) -> Self {
        Self {
            valid: false,
            dirty: false,
            marked: false,
            tag: 0,
            block: vec![0; line_size].into_boxed_slice(),
        }
    }

    /// True once the line has been filled (until invalidated).
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// True if the block holds stores not yet written back.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// True if the line is marked in the current Randomized Marking phase.
    pub const fn is_marked(&self) -> bool {
        self.marked
    }

    /// The stored tag.
    pub const fn tag(&self) -> u64 {
        self.tag
    }

    /// The block contents.
    pub fn block(&self) -> &[u8] {
        &self.block
    }

    pub(crate) fn block_mut(&mut self) -> &mut [u8] {
        &mut self.block
    }

    /// True if the line is valid and holds the block with `tag`.
    #[inline(always)]
    pub const fn matches(&self, tag: u64) -> bool {
        self.valid && self.tag == tag
    }

    /// Returns the little-endian 64-bit word starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset + 8` exceeds the line size; a word may not cross a line.
    #[inline]
    pub fn retrieve(&self, offset: usize) -> u64 {
        let mut word = [0u8; WORD_BYTES];
        word.copy_from_slice(&self.block[self.word_range(offset)]);
        u64::from_le_bytes(word)
    }

    /// Overwrites the 64-bit word starting at `offset`, little-endian.
    ///
    /// # Panics
    ///
    /// Panics if `offset + 8` exceeds the line size.
    #[inline]
    pub(crate) fn store(&mut self, offset: usize, value: u64) {
        let range = self.word_range(offset);
        self.block[range].copy_from_slice(&value.to_le_bytes());
    }

    fn word_range(&self, offset: usize) -> std::ops::Range<usize> {
        assert!(
            offset + WORD_BYTES <= self.block.len(),
            "word at offset {} crosses a {}-byte line",
            offset,
            self.block.len()
        );
        offset..offset + WORD_BYTES
    }
}
