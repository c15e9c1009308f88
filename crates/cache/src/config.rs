//! Configuration for the cache simulator.
//!
//! This module defines the configuration structures and enums used to parameterize
//! a cache. It provides:
//! 1. **Defaults:** Baseline geometry constants (capacity, line size, associativity).
//! 2. **Enums:** Replacement policy, write mode, and write-allocate choice.
//! 3. **Packed Policies:** Decoding and encoding of the single policy byte.
//!
//! A configuration is supplied as JSON (see [`CacheConfig::from_json`]), built from
//! a packed policy byte (see [`CacheConfig::from_policy_byte`]), or taken from
//! `CacheConfig::default()`.

use serde::Deserialize;

use crate::common::CacheError;
use crate::common::constants::{
    REPLACEMENT_LRU, REPLACEMENT_MASK, REPLACEMENT_MRU, REPLACEMENT_RANDOM,
    REPLACEMENT_RANDOMIZED_MARKING, RESERVED_MASK, TRACE_MASK, WRITE_ALLOCATE, WRITE_BACK,
    WRITE_NO_ALLOCATE, WRITE_THROUGH,
};

/// Default configuration constants for the cache.
mod defaults {
    /// Default cache capacity in bytes (4 KiB).
    pub const CACHE_SIZE: usize = 4096;

    /// Default cache line size in bytes (64 bytes).
    ///
    /// Matches typical modern processor cache line sizes.
    pub const CACHE_LINE: usize = 64;

    /// Default cache associativity (4 ways).
    pub const CACHE_WAYS: usize = 4;
}

/// Cache replacement policy algorithms.
///
/// Specifies the algorithm used to select which line to evict when a new block must
/// be installed in a set with no invalid line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// Random replacement policy.
    ///
    /// Evicts a uniformly chosen line using the injected random source.
    #[serde(alias = "Random")]
    Random,
    /// Least Recently Used replacement policy.
    ///
    /// Evicts the line that was accessed least recently.
    #[default]
    #[serde(alias = "Lru")]
    Lru,
    /// Most Recently Used replacement policy.
    ///
    /// Evicts the line that was filled most recently. Hits do not reorder lines.
    #[serde(alias = "Mru")]
    Mru,
    /// Randomized Marking replacement policy.
    ///
    /// Marks touched lines and evicts uniformly among unmarked ones, clearing all
    /// marks when every line in the set is marked.
    #[serde(alias = "RandomizedMarking", alias = "MARKING", alias = "Marking")]
    RandomizedMarking,
}

impl ReplacementPolicy {
    /// Decodes the replacement bits (2–4) of a packed policy byte.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::UnknownReplacementPolicy`] for bit patterns that name no
    /// policy (`011`, `101`, `110`, `111`).
    pub fn from_bits(byte: u8) -> Result<Self, CacheError> {
        match byte & REPLACEMENT_MASK {
            REPLACEMENT_RANDOM => Ok(Self::Random),
            REPLACEMENT_LRU => Ok(Self::Lru),
            REPLACEMENT_MRU => Ok(Self::Mru),
            REPLACEMENT_RANDOMIZED_MARKING => Ok(Self::RandomizedMarking),
            other => Err(CacheError::UnknownReplacementPolicy(other)),
        }
    }

    /// Returns the replacement bits for this policy, in place.
    pub const fn bits(self) -> u8 {
        match self {
            Self::Random => REPLACEMENT_RANDOM,
            Self::Lru => REPLACEMENT_LRU,
            Self::Mru => REPLACEMENT_MRU,
            Self::RandomizedMarking => REPLACEMENT_RANDOMIZED_MARKING,
        }
    }
}

/// When stores reach memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum WriteMode {
    /// Every store is propagated to memory immediately; lines are never dirty.
    #[default]
    #[serde(alias = "write_through")]
    WriteThrough,
    /// Stores mark the line dirty; memory is updated when the line is evicted.
    #[serde(alias = "write_back")]
    WriteBack,
}

/// What a store miss does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum WriteAllocate {
    /// The block is brought into the cache, then written.
    #[default]
    #[serde(alias = "allocate")]
    Allocate,
    /// The store goes to memory only; the cache is left untouched.
    #[serde(alias = "no_allocate")]
    NoAllocate,
}

/// The combined write policy (bits 0–1 of the policy byte).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WritePolicy {
    /// Write-through or write-back.
    pub mode: WriteMode,
    /// Write-allocate or write-no-allocate.
    pub allocate: WriteAllocate,
}

impl WritePolicy {
    /// Decodes the write bits (0–1) of a packed policy byte. Every pattern is valid.
    pub const fn from_bits(byte: u8) -> Self {
        let mode = if byte & WRITE_BACK == 0 {
            WriteMode::WriteThrough
        } else {
            WriteMode::WriteBack
        };
        let allocate = if byte & WRITE_NO_ALLOCATE == 0 {
            WriteAllocate::Allocate
        } else {
            WriteAllocate::NoAllocate
        };
        Self { mode, allocate }
    }

    /// Returns the write bits for this policy, in place.
    pub const fn bits(self) -> u8 {
        let mode = match self.mode {
            WriteMode::WriteThrough => WRITE_THROUGH,
            WriteMode::WriteBack => WRITE_BACK,
        };
        let allocate = match self.allocate {
            WriteAllocate::Allocate => WRITE_ALLOCATE,
            WriteAllocate::NoAllocate => WRITE_NO_ALLOCATE,
        };
        mode | allocate
    }

    /// True for write-back.
    pub const fn is_write_back(self) -> bool {
        matches!(self.mode, WriteMode::WriteBack)
    }

    /// True for write-allocate.
    pub const fn allocates(self) -> bool {
        matches!(self.allocate, WriteAllocate::Allocate)
    }
}

/// A packed policy byte, decoded once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Policies {
    /// Victim selection algorithm.
    pub replacement: ReplacementPolicy,
    /// Store handling.
    pub write: WritePolicy,
    /// Emit a trace event for every access.
    pub trace: bool,
}

impl Policies {
    /// Decodes a packed policy byte.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ReservedPolicyBits`] if bit 6 or 7 is set, or
    /// [`CacheError::UnknownReplacementPolicy`] if bits 2–4 name no policy.
    pub fn from_bits(byte: u8) -> Result<Self, CacheError> {
        if byte & RESERVED_MASK != 0 {
            return Err(CacheError::ReservedPolicyBits(byte));
        }
        Ok(Self {
            replacement: ReplacementPolicy::from_bits(byte)?,
            write: WritePolicy::from_bits(byte),
            trace: byte & TRACE_MASK != 0,
        })
    }

    /// Encodes these policies back into the packed byte.
    pub const fn bits(self) -> u8 {
        let trace = if self.trace { TRACE_MASK } else { 0 };
        self.replacement.bits() | self.write.bits() | trace
    }
}

/// Configuration for a single set-associative cache.
///
/// # Examples
///
/// ```
/// use dcsim_core::config::{CacheConfig, ReplacementPolicy, WriteMode};
///
/// let json = r#"{
///     "size_bytes": 64,
///     "line_bytes": 16,
///     "ways": 2,
///     "policy": "MRU",
///     "write_mode": "WriteBack"
/// }"#;
///
/// let config = CacheConfig::from_json(json)?;
/// assert_eq!(config.policy, ReplacementPolicy::Mru);
/// assert_eq!(config.write_mode, WriteMode::WriteBack);
/// assert!(!config.trace);
/// # Ok::<(), dcsim_core::CacheError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Total data capacity in bytes
    #[serde(default = "CacheConfig::default_size_bytes")]
    pub size_bytes: usize,

    /// Bytes per line (block size)
    #[serde(default = "CacheConfig::default_line_bytes")]
    pub line_bytes: usize,

    /// Lines per set (associativity)
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Replacement policy
    #[serde(default)]
    pub policy: ReplacementPolicy,

    /// Write-through or write-back
    #[serde(default)]
    pub write_mode: WriteMode,

    /// Allocate on store miss or not
    #[serde(default)]
    pub write_allocate: WriteAllocate,

    /// Emit a trace event per access
    #[serde(default)]
    pub trace: bool,
}

impl CacheConfig {
    /// Returns the default cache capacity in bytes.
    fn default_size_bytes() -> usize {
        defaults::CACHE_SIZE
    }

    /// Returns the default line size in bytes.
    fn default_line_bytes() -> usize {
        defaults::CACHE_LINE
    }

    /// Returns the default associativity.
    fn default_ways() -> usize {
        defaults::CACHE_WAYS
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Config`] if the text is not a valid configuration.
    pub fn from_json(json: &str) -> Result<Self, CacheError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds a configuration from sizes and a packed policy byte.
    ///
    /// # Arguments
    ///
    /// * `size_bytes` - Total data capacity.
    /// * `line_bytes` - Bytes per line.
    /// * `ways` - Lines per set.
    /// * `policies` - Packed replacement/write/trace byte.
    ///
    /// # Errors
    ///
    /// Returns an error if the policy byte does not decode; geometry is checked later,
    /// when the cache is built.
    pub fn from_policy_byte(
        size_bytes: usize,
        line_bytes: usize,
        ways: usize,
        policies: u8,
    ) -> Result<Self, CacheError> {
        let decoded = Policies::from_bits(policies)?;
        Ok(Self {
            size_bytes,
            line_bytes,
            ways,
            policy: decoded.replacement,
            write_mode: decoded.write.mode,
            write_allocate: decoded.write.allocate,
            trace: decoded.trace,
        })
    }

    /// The decoded policies carried by this configuration.
    pub const fn policies(&self) -> Policies {
        Policies {
            replacement: self.policy,
            write: WritePolicy {
                mode: self.write_mode,
                allocate: self.write_allocate,
            },
            trace: self.trace,
        }
    }

    /// The packed policy byte equivalent to this configuration.
    pub const fn policy_byte(&self) -> u8 {
        self.policies().bits()
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::CACHE_SIZE,
            line_bytes: defaults::CACHE_LINE,
            ways: defaults::CACHE_WAYS,
            policy: ReplacementPolicy::default(),
            write_mode: WriteMode::default(),
            write_allocate: WriteAllocate::default(),
            trace: false,
        }
    }
}
