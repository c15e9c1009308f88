//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides the building blocks shared by the configuration layer and the
//! cache engine. It includes:
//! 1. **Address Decoding:** Splitting an address into tag, set index, and block offset.
//! 2. **Constants:** The bit-exact layout of the packed policy byte.
//! 3. **Error Handling:** Construction-time configuration errors.

/// Address decoding (tag / set index / block offset).
pub mod addr;

/// Packed policy byte masks and values.
pub mod constants;

/// Error types for cache construction.
pub mod error;

pub use addr::{AddressDecoder, DecodedAddr};
pub use error::CacheError;
