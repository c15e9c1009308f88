//! Cache access statistics.
//!
//! Two monotone counters, accesses and misses, from which hits and the miss rate are
//! derived. Counters are 32-bit and wrap on overflow.

use std::fmt;

use serde::Serialize;

/// Access and miss counters for one cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of reads and writes performed.
    pub accesses: u32,
    /// Number of those accesses that missed.
    pub misses: u32,
}

impl CacheStats {
    /// Counts one access.
    #[inline]
    pub const fn record_access(&mut self) {
        self.accesses = self.accesses.wrapping_add(1);
    }

    /// Counts one miss.
    #[inline]
    pub const fn record_miss(&mut self) {
        self.misses = self.misses.wrapping_add(1);
    }

    /// Accesses that hit.
    pub const fn hits(&self) -> u32 {
        self.accesses.wrapping_sub(self.misses)
    }

    /// Fraction of accesses that missed, or 0.0 before the first access.
    pub fn miss_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            f64::from(self.misses) / f64::from(self.accesses)
        }
    }

    /// Fraction of accesses that hit, or 0.0 before the first access.
    pub fn hit_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            f64::from(self.hits()) / f64::from(self.accesses)
        }
    }

    /// Prints the counters to stdout in the simulator's report format.
    pub fn print(&self) {
        println!("==========================================================");
        println!("DATA CACHE STATISTICS");
        println!("==========================================================");
        print!("{self}");
        println!("----------------------------------------------------------");
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  cache.accesses         {}", self.accesses)?;
        writeln!(f, "  cache.hits             {}", self.hits())?;
        writeln!(f, "  cache.misses           {}", self.misses)?;
        writeln!(f, "  cache.miss_rate        {:.2}%", self.miss_rate() * 100.0)
    }
}
