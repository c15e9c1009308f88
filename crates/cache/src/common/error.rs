//! Cache construction errors.
//!
//! Every access operation on a built cache is total, so the only fallible step is
//! construction: turning sizes and a packed policy byte into a valid geometry.
//! Each rejection reason is a distinct variant so callers can tell them apart.

use thiserror::Error;

/// Reasons a cache configuration is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CacheError {
    /// A size field that must be a power of two is not (zero included).
    #[error("{field} must be a power of two, got {value}")]
    NotPowerOfTwo {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: usize,
    },

    /// Associativity of zero.
    #[error("associativity must be at least 1")]
    ZeroAssociativity,

    /// Capacity cannot hold even one full set.
    #[error("capacity of {total_bytes} bytes is smaller than one set ({required} bytes)")]
    CapacityTooSmall {
        /// Configured capacity.
        total_bytes: usize,
        /// `line_size * associativity`.
        required: usize,
    },

    /// Associativity does not divide the number of lines.
    #[error("associativity {associativity} does not divide {num_lines} lines")]
    AssociativityMismatch {
        /// Number of lines in the cache.
        num_lines: usize,
        /// Requested lines per set.
        associativity: usize,
    },

    /// Replacement bits hold a value that names no policy.
    #[error("unknown replacement policy bits {0:#07b}")]
    UnknownReplacementPolicy(u8),

    /// One of the reserved policy bits (6–7) is set.
    #[error("reserved policy bits set in {0:#010b}")]
    ReservedPolicyBits(u8),

    /// A JSON configuration could not be parsed.
    #[error("invalid cache configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}
