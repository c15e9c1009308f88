//! Packed policy byte layout.
//!
//! A cache's replacement and write policies travel as a single byte. The layout is:
//!
//! | Bits | Field            | Values                                              |
//! |------|------------------|-----------------------------------------------------|
//! | 0    | write policy A   | 0 = write-through, 1 = write-back                   |
//! | 1    | write policy B   | 0 = write-allocate, 1 = write-no-allocate           |
//! | 2–4  | replacement      | 000 Random, 001 LRU, 010 MRU, 100 Randomized Marking |
//! | 5    | trace enable     | 1 = emit a trace event per access                   |
//! | 6–7  | reserved         | must be 0                                           |
//!
//! The byte is decoded once at construction into
//! [`Policies`](crate::config::Policies); nothing on the access path tests bits.

/// Bits selecting the replacement policy.
pub const REPLACEMENT_MASK: u8 = 0b0001_1100;

/// Random replacement.
pub const REPLACEMENT_RANDOM: u8 = 0b0000_0000;

/// Least-recently-used replacement.
pub const REPLACEMENT_LRU: u8 = 0b0000_0100;

/// Most-recently-used replacement.
pub const REPLACEMENT_MRU: u8 = 0b0000_1000;

/// Randomized Marking replacement.
pub const REPLACEMENT_RANDOMIZED_MARKING: u8 = 0b0001_0000;

/// Bits selecting the write policy.
pub const WRITE_MASK: u8 = 0b0000_0011;

/// Stores propagate to memory immediately.
pub const WRITE_THROUGH: u8 = 0b0000_0000;

/// Stores stay in the cache until the line is evicted.
pub const WRITE_BACK: u8 = 0b0000_0001;

/// A store miss brings the line into the cache.
pub const WRITE_ALLOCATE: u8 = 0b0000_0000;

/// A store miss goes to memory only.
pub const WRITE_NO_ALLOCATE: u8 = 0b0000_0010;

/// Bit enabling per-access trace events.
pub const TRACE_MASK: u8 = 0b0010_0000;

/// Reserved bits; must be zero.
pub const RESERVED_MASK: u8 = 0b1100_0000;

/// Width in bytes of the word returned by a read and stored by a write.
pub const WORD_BYTES: usize = 8;

/// Width in bits of a simulated address.
pub const ADDRESS_BITS: u32 = u64::BITS;
