//! Address decoding.
//!
//! This module splits a simulated address into the three fields a set-associative
//! cache indexes by. It provides the following:
//! 1. **Field Extraction:** Tag, set index, and block offset from precomputed masks and shifts.
//! 2. **Block Alignment:** The address of the first byte of the block containing an address.
//! 3. **Reconstruction:** Rebuilding a block address from a stored tag and set index (write-back).
//!
//! Addresses are 64 bits wide. The tag mask covers every bit above the tag shift.

use super::constants::ADDRESS_BITS;

/// The three fields of a decoded address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DecodedAddr {
    /// Bits above the set index; identifies which block occupies a line.
    pub tag: u64,
    /// Which set the block maps to.
    pub set_index: usize,
    /// Byte position within the block.
    pub offset: usize,
}

/// Precomputed masks and shifts for a given block size and set count.
///
/// The decoder is stateless once built; `decode` is a pure function of the address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressDecoder {
    offset_bits: u32,
    index_bits: u32,
    offset_mask: u64,
    index_mask: u64,
    index_shift: u32,
    tag_shift: u32,
    tag_mask: u64,
}

/// Returns log2 of a power-of-two value.
#[inline]
const fn log2(value: usize) -> u32 {
    value.trailing_zeros()
}

/// Returns a mask `nbits` wide.
#[inline]
const fn mask_bits(nbits: u32) -> u64 {
    if nbits >= ADDRESS_BITS {
        u64::MAX
    } else {
        (1u64 << nbits) - 1
    }
}

impl AddressDecoder {
    /// Creates a decoder for the given geometry.
    ///
    /// # Arguments
    ///
    /// * `line_size` - Bytes per block. Must be a power of two.
    /// * `num_sets` - Number of sets. Must be a power of two.
    ///
    /// # Returns
    ///
    /// A decoder whose offset field is `log2(line_size)` bits wide and whose
    /// index field is `log2(num_sets)` bits wide.
    pub const fn new(line_size: usize, num_sets: usize) -> Self {
        let offset_bits = log2(line_size);
        let index_bits = log2(num_sets);
        let tag_shift = offset_bits + index_bits;
        let tag_mask = match u64::MAX.checked_shl(tag_shift) {
            Some(mask) => mask,
            None => 0,
        };

        Self {
            offset_bits,
            index_bits,
            offset_mask: mask_bits(offset_bits),
            index_mask: mask_bits(index_bits) << offset_bits,
            index_shift: offset_bits,
            tag_shift,
            tag_mask,
        }
    }

    /// Splits an address into tag, set index, and block offset.
    ///
    /// With a single set the index is always 0; with one-byte lines the offset is always 0.
    #[inline(always)]
    pub const fn decode(&self, addr: u64) -> DecodedAddr {
        DecodedAddr {
            tag: self.tag(addr),
            set_index: ((addr & self.index_mask) >> self.index_shift) as usize,
            offset: (addr & self.offset_mask) as usize,
        }
    }

    /// Returns the tag of an address.
    #[inline(always)]
    pub const fn tag(&self, addr: u64) -> u64 {
        match addr.checked_shr(self.tag_shift) {
            Some(tag) => tag,
            None => 0,
        }
    }

    /// Returns the address of the first byte of the block containing `addr`.
    #[inline(always)]
    pub const fn block_base(&self, addr: u64) -> u64 {
        addr & !self.offset_mask
    }

    /// Rebuilds the block address a line was filled from.
    ///
    /// # Arguments
    ///
    /// * `tag` - The tag stored in the line.
    /// * `set_index` - The set holding the line.
    ///
    /// # Returns
    ///
    /// `(tag << tag_shift) | (set_index << index_shift)`, the block-aligned address.
    #[inline]
    pub const fn rebuild(&self, tag: u64, set_index: usize) -> u64 {
        let tag_bits = match tag.checked_shl(self.tag_shift) {
            Some(bits) => bits & self.tag_mask,
            None => 0,
        };
        tag_bits | (((set_index as u64) << self.index_shift) & self.index_mask)
    }

    /// Number of bits in the block offset field.
    pub const fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// Number of bits in the set index field.
    pub const fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Mask selecting the block offset bits.
    pub const fn offset_mask(&self) -> u64 {
        self.offset_mask
    }

    /// Mask selecting the set index bits, in place (already shifted).
    pub const fn index_mask(&self) -> u64 {
        self.index_mask
    }

    /// Shift that moves the set index field down to bit 0.
    pub const fn index_shift(&self) -> u32 {
        self.index_shift
    }

    /// Shift that moves the tag field down to bit 0.
    pub const fn tag_shift(&self) -> u32 {
        self.tag_shift
    }

    /// Mask selecting the tag bits, in place.
    pub const fn tag_mask(&self) -> u64 {
        self.tag_mask
    }
}
