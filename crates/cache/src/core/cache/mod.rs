//! Set-Associative Cache Simulator.
//!
//! This module implements a configurable set-associative data cache in front of a flat
//! backing memory. It supports LRU, MRU, Random and Randomized Marking replacement and
//! the four combinations of write-through/write-back with write-allocate/no-allocate.
//! Reads return the 64-bit little-endian word at the requested address, filling the
//! containing block on a miss.
//!
//! Storage is allocated once, in the constructor: each set owns its lines and each
//! line owns its block. `read` and `write` never allocate.

/// Cache line storage.
pub mod line;

/// Cache replacement policy implementations (LRU, MRU, Random, Randomized Marking).
pub mod policies;

/// Cache set storage and replacement bookkeeping.
pub mod set;

use tracing::{debug, trace};

use self::line::CacheLine;
use self::policies::ReplacementPolicy;
use self::set::CacheSet;
use crate::common::{AddressDecoder, CacheError, DecodedAddr};
use crate::config::{CacheConfig, Policies};
use crate::memory::BackingMemory;
use crate::rng::RandomSource;
use crate::stats::CacheStats;

/// Target used for per-access trace events.
const TRACE_TARGET: &str = "dcsim::cache";

/// Set-associative cache with configurable replacement and write policies.
///
/// The cache never owns randomness or memory: both are passed to every access. The
/// decoded policies, geometry, and all line storage are fixed at construction and
/// released when the cache is dropped.
#[derive(Debug)]
pub struct Cache {
    config: CacheConfig,
    policies: Policies,
    decoder: AddressDecoder,
    num_lines: usize,
    sets: Box<[CacheSet]>,
    policy: Box<dyn ReplacementPolicy>,
    stats: CacheStats,
}

impl Cache {
    /// Creates a cache from sizes and a packed policy byte.
    ///
    /// # Arguments
    ///
    /// * `total_bytes` - Data capacity; a power of two, at least one full set.
    /// * `line_size` - Bytes per line; a power of two.
    /// * `associativity` - Lines per set; at least 1 and dividing the line count.
    /// * `policies` - Packed replacement/write/trace byte (see
    ///   [`constants`](crate::common::constants)).
    ///
    /// # Errors
    ///
    /// Returns a [`CacheError`] describing the first constraint the arguments violate.
    pub fn new(
        total_bytes: usize,
        line_size: usize,
        associativity: usize,
        policies: u8,
    ) -> Result<Self, CacheError> {
        let config = CacheConfig::from_policy_byte(total_bytes, line_size, associativity, policies)?;
        Self::from_config(&config)
    }

    /// Creates a cache from a configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`CacheError`] if the geometry is invalid.
    pub fn from_config(config: &CacheConfig) -> Result<Self, CacheError> {
        let total_bytes = config.size_bytes;
        let line_size = config.line_bytes;
        let associativity = config.ways;

        if !total_bytes.is_power_of_two() {
            return Err(CacheError::NotPowerOfTwo {
                field: "total_bytes",
                value: total_bytes,
            });
        }
        if !line_size.is_power_of_two() {
            return Err(CacheError::NotPowerOfTwo {
                field: "line_size",
                value: line_size,
            });
        }
        if associativity == 0 {
            return Err(CacheError::ZeroAssociativity);
        }
        let required = line_size.saturating_mul(associativity);
        if total_bytes < required {
            return Err(CacheError::CapacityTooSmall {
                total_bytes,
                required,
            });
        }

        let num_lines = total_bytes / line_size;
        if num_lines % associativity != 0 {
            return Err(CacheError::AssociativityMismatch {
                num_lines,
                associativity,
            });
        }
        let num_sets = num_lines / associativity;
        let decoder = AddressDecoder::new(line_size, num_sets);
        let policies = config.policies();

        debug!(
            total_bytes,
            line_size,
            associativity,
            num_sets,
            offset_bits = decoder.offset_bits(),
            index_bits = decoder.index_bits(),
            replacement = ?policies.replacement,
            write = ?policies.write,
            "cache created"
        );

        Ok(Self {
            config: config.clone(),
            policies,
            decoder,
            num_lines,
            sets: (0..num_sets)
                .map(|_| CacheSet::new(associativity, line_size))
                .collect(),
            policy: self::policies::build(policies.replacement),
            stats: CacheStats::default(),
        })
    }

    /// Reads the 64-bit little-endian word at `addr`.
    ///
    /// On a miss a victim line is chosen by the replacement policy, written back if
    /// dirty, and filled with the `line_size` bytes of the block containing `addr`.
    ///
    /// # Arguments
    ///
    /// * `memory` - Backing memory to fill from (and write dirty victims to).
    /// * `addr` - Byte address of the word; it may be unaligned within its line.
    /// * `rng` - Random source for randomized replacement.
    ///
    /// # Panics
    ///
    /// Panics if the word would cross the end of its line, or if `memory` does not
    /// back the block being filled.
    pub fn read<M, R>(&mut self, memory: &mut M, addr: u64, rng: &mut R) -> u64
    where
        M: BackingMemory + ?Sized,
        R: RandomSource,
    {
        self.stats.record_access();
        let decoded = self.decoder.decode(addr);

        let way = match self.lookup(decoded) {
            Some(way) => {
                self.trace_access("read", addr, decoded, true, None);
                way
            }
            None => {
                self.stats.record_miss();
                let (way, evicted) = self.fill(memory, addr, decoded, rng);
                self.trace_access("read", addr, decoded, false, evicted);
                way
            }
        };

        self.sets[decoded.set_index].line(way).retrieve(decoded.offset)
    }

    /// Writes the 64-bit word `value` at `addr` (little-endian).
    ///
    /// | mode                        | hit                              | miss                          |
    /// |-----------------------------|----------------------------------|-------------------------------|
    /// | write-through, allocate     | update line (clean) and memory   | fill, update line and memory  |
    /// | write-through, no-allocate  | update line (clean) and memory   | update memory only            |
    /// | write-back, allocate        | update line, mark dirty          | fill, update line, mark dirty |
    /// | write-back, no-allocate     | update line, mark dirty          | update memory only            |
    ///
    /// Writes count as accesses (and misses) exactly like reads.
    ///
    /// # Panics
    ///
    /// Panics if the word would cross the end of a cached line, or if `memory` does
    /// not back an address it has to touch.
    pub fn write<M, R>(&mut self, memory: &mut M, addr: u64, value: u64, rng: &mut R)
    where
        M: BackingMemory + ?Sized,
        R: RandomSource,
    {
        self.stats.record_access();
        let decoded = self.decoder.decode(addr);
        let write = self.policies.write;

        let way = match self.lookup(decoded) {
            Some(way) => {
                self.trace_access("write", addr, decoded, true, None);
                Some(way)
            }
            None => {
                self.stats.record_miss();
                if write.allocates() {
                    let (way, evicted) = self.fill(memory, addr, decoded, rng);
                    self.trace_access("write", addr, decoded, false, evicted);
                    Some(way)
                } else {
                    self.trace_access("write", addr, decoded, false, None);
                    None
                }
            }
        };

        let bytes = value.to_le_bytes();
        match way {
            Some(way) => {
                let line = self.sets[decoded.set_index].line_mut(way);
                line.store(decoded.offset, value);
                if write.is_write_back() {
                    line.dirty = true;
                } else {
                    line.dirty = false;
                    memory.write_block(addr, &bytes);
                }
            }
            None => memory.write_block(addr, &bytes),
        }
    }

    /// Returns whether `addr` is cached, without touching statistics or policy state.
    pub fn probe(&self, addr: u64) -> bool {
        let decoded = self.decoder.decode(addr);
        self.sets[decoded.set_index]
            .find_matching(decoded.tag)
            .is_some()
    }

    /// Drops the line holding `addr`, writing it back first if it is dirty.
    ///
    /// # Returns
    ///
    /// `true` if a line was invalidated.
    pub fn invalidate<M>(&mut self, memory: &mut M, addr: u64) -> bool
    where
        M: BackingMemory + ?Sized,
    {
        let decoded = self.decoder.decode(addr);
        let Some(way) = self.sets[decoded.set_index].find_matching(decoded.tag) else {
            return false;
        };
        self.write_back(memory, decoded.set_index, way);
        self.sets[decoded.set_index].invalidate(way);
        true
    }

    /// Writes back every dirty line, then invalidates the whole cache.
    pub fn flush<M>(&mut self, memory: &mut M)
    where
        M: BackingMemory + ?Sized,
    {
        for set_index in 0..self.sets.len() {
            for way in 0..self.associativity() {
                if self.sets[set_index].line(way).is_valid() {
                    self.write_back(memory, set_index, way);
                    self.sets[set_index].invalidate(way);
                }
            }
        }
    }

    /// Number of accesses since the cache was created.
    pub const fn access_count(&self) -> u32 {
        self.stats.accesses
    }

    /// Number of misses since the cache was created.
    pub const fn miss_count(&self) -> u32 {
        self.stats.misses
    }

    /// Number of hits since the cache was created.
    pub const fn hit_count(&self) -> u32 {
        self.stats.hits()
    }

    /// Access and miss counters.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// The configuration the cache was built from.
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// The decoded policies.
    pub const fn policies(&self) -> Policies {
        self.policies
    }

    /// The address decoder for this geometry.
    pub const fn decoder(&self) -> &AddressDecoder {
        &self.decoder
    }

    /// Bytes per line.
    pub const fn line_size(&self) -> usize {
        self.config.line_bytes
    }

    /// Lines per set.
    pub const fn associativity(&self) -> usize {
        self.config.ways
    }

    /// Total number of lines.
    pub const fn num_lines(&self) -> usize {
        self.num_lines
    }

    /// Number of sets.
    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    /// The set at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_sets()`.
    pub fn set(&self, index: usize) -> &CacheSet {
        &self.sets[index]
    }

    /// The line caching `addr`, if any.
    pub fn line_for(&self, addr: u64) -> Option<&CacheLine> {
        let decoded = self.decoder.decode(addr);
        let set = &self.sets[decoded.set_index];
        set.find_matching(decoded.tag).map(|way| set.line(way))
    }

    /// Finds the line for a decoded address and applies hit bookkeeping.
    fn lookup(&mut self, decoded: DecodedAddr) -> Option<usize> {
        let set = &mut self.sets[decoded.set_index];
        let way = set.find_matching(decoded.tag)?;
        self.policy.on_hit(set, way);
        Some(way)
    }

    /// Installs the block containing `addr` into its set.
    ///
    /// # Returns
    ///
    /// The filled way and, if a valid line was replaced, the block address it held.
    fn fill<M, R>(
        &mut self,
        memory: &mut M,
        addr: u64,
        decoded: DecodedAddr,
        rng: &mut R,
    ) -> (usize, Option<u64>)
    where
        M: BackingMemory + ?Sized,
        R: RandomSource,
    {
        let set_index = decoded.set_index;
        let way = self
            .policy
            .select_victim(&mut self.sets[set_index], rng);

        let victim = self.sets[set_index].line(way);
        let evicted = victim
            .is_valid()
            .then(|| self.decoder.rebuild(victim.tag(), set_index));
        self.write_back(memory, set_index, way);

        let line = self.sets[set_index].line_mut(way);
        line.tag = decoded.tag;
        line.valid = true;
        line.dirty = false;
        memory.read_block(self.decoder.block_base(addr), line.block_mut());

        self.policy.on_fill(&mut self.sets[set_index], way);
        (way, evicted)
    }

    /// Writes the line in `way` back to memory if it is valid and dirty.
    fn write_back<M>(&mut self, memory: &mut M, set_index: usize, way: usize)
    where
        M: BackingMemory + ?Sized,
    {
        let line = self.sets[set_index].line_mut(way);
        if !(line.valid && line.dirty) {
            return;
        }
        let block_addr = self.decoder.rebuild(line.tag, set_index);
        memory.write_block(block_addr, line.block());
        line.dirty = false;
        if self.policies.trace {
            debug!(target: TRACE_TARGET, block_addr, set = set_index, way, "write-back");
        }
    }

    fn trace_access(
        &self,
        kind: &'static str,
        addr: u64,
        decoded: DecodedAddr,
        hit: bool,
        evicted: Option<u64>,
    ) {
        if !self.policies.trace {
            return;
        }
        match evicted {
            Some(evicted) => trace!(
                target: TRACE_TARGET,
                kind,
                addr,
                set = decoded.set_index,
                tag = decoded.tag,
                hit,
                evicted,
                "access"
            ),
            None => trace!(
                target: TRACE_TARGET,
                kind,
                addr,
                set = decoded.set_index,
                tag = decoded.tag,
                hit,
                "access"
            ),
        }
    }
}
