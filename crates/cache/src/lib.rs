//! Set-associative data cache simulator library.
//!
//! This crate models a single CPU data cache in front of a flat byte-addressed memory:
//! 1. **Decoding:** Splitting addresses into tag, set index, and block offset.
//! 2. **Storage:** Sets of lines, each owning a block of bytes plus valid/dirty/marked bits.
//! 3. **Replacement:** LRU, MRU, Random, and Randomized Marking victim selection.
//! 4. **Access:** Reads with fill-on-miss and writes under all four write-policy combinations.
//! 5. **Statistics:** Access and miss counters.
//!
//! Randomness is never owned by the cache: every entry point receives a
//! [`RandomSource`](crate::rng::RandomSource) from the caller, so a fixed
//! sequence of random numbers reproduces a run exactly.
//!
//! ```
//! use dcsim_core::{Cache, FlatMemory, XorShiftRng};
//! use dcsim_core::common::constants::{REPLACEMENT_LRU, WRITE_BACK};
//!
//! let mut memory = FlatMemory::new(0, 0x1000);
//! memory.write_u64(0x100, 0xDEAD_BEEF);
//!
//! let mut cache = Cache::new(64, 16, 2, REPLACEMENT_LRU | WRITE_BACK)?;
//! let mut rng = XorShiftRng::new(7);
//!
//! assert_eq!(cache.read(&mut memory, 0x100, &mut rng), 0xDEAD_BEEF);
//! assert_eq!(cache.access_count(), 1);
//! assert_eq!(cache.miss_count(), 1);
//! # Ok::<(), dcsim_core::CacheError>(())
//! ```

/// Common types and constants (address decoding, policy bits, errors).
pub mod common;
/// Cache configuration (defaults, policy enums, packed policy byte).
pub mod config;
/// Cache engine (controller, sets, lines, replacement policies).
pub mod core;
/// Backing memory the cache fills from and writes back to.
pub mod memory;
/// Injected random-number sources for randomized replacement.
pub mod rng;
/// Access and miss statistics.
pub mod stats;

/// Error returned when a cache configuration is rejected.
pub use crate::common::CacheError;
/// Configuration type; build with `CacheConfig::default()` or deserialize from JSON.
pub use crate::config::CacheConfig;
/// The cache controller; construct with `Cache::new` or `Cache::from_config`.
pub use crate::core::cache::Cache;
/// Flat, vector-backed memory used as the cache's backing store.
pub use crate::memory::{BackingMemory, FlatMemory};
/// Random sources accepted by `read` and `write`.
pub use crate::rng::{RandomSource, XorShiftRng};
