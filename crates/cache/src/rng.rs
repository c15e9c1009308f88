//! Injected random-number sources.
//!
//! Random and Randomized Marking replacement need random numbers, but the cache never
//! owns or seeds a generator: the caller passes one to every `read` and `write`. A
//! victim index is always `next_u32() % candidates`.
//!
//! Any `FnMut() -> u32` closure is a source, so tests can script an exact sequence.
//! [`XorShiftRng`] is a small seedable generator for everything else.

/// A source of random numbers handed to the cache on each access.
pub trait RandomSource {
    /// Returns the next random number.
    fn next_u32(&mut self) -> u32;
}

impl<F> RandomSource for F
where
    F: FnMut() -> u32,
{
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self()
    }
}

/// Xorshift64 pseudo-random generator.
///
/// Deterministic for a given seed: two generators built with the same seed yield the
/// same sequence, which makes Random and Randomized Marking runs reproducible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XorShiftRng {
    state: u64,
}

impl XorShiftRng {
    /// Seed used when the caller passes zero (xorshift never leaves the zero state).
    const FALLBACK_SEED: u64 = 123_456_789;

    /// Creates a generator from a seed.
    ///
    /// # Arguments
    ///
    /// * `seed` - Initial state. Zero is replaced by a fixed non-zero seed.
    pub const fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the generator and returns the full 64-bit state.
    pub const fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl Default for XorShiftRng {
    fn default() -> Self {
        Self::new(Self::FALLBACK_SEED)
    }
}

impl RandomSource for XorShiftRng {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }
}
