//! Injected randomness for maze generation
//!
//! Generation never touches an ambient random source. Every choice (door
//! columns, partition lines, gap positions, which edge stays solid) is drawn
//! from a [`RandomSource`] passed in by the caller, so a fixed seed always
//! reproduces the same maze.
//!
//! [`SimpleLCG`] is the bundled implementation: a Park-Miller Linear
//! Congruential Generator (MINSTD).
//!
//! Constants:
//! - Multiplier (a): 48271
//! - Modulus (m): 2^31 - 1 = 2147483647
//!
//! Reference: https://en.wikipedia.org/wiki/Lehmer_random_number_generator

const MODULUS: u64 = 2147483647; // 2^31 - 1
const MULTIPLIER: u64 = 48271;

/// Source of uniformly distributed integers used by the generator.
///
/// Only [`RandomSource::below`] must be provided; the range and shuffle
/// helpers are derived from it.
pub trait RandomSource {
    /// Uniform integer in `[0, bound)`. `bound` is never zero.
    fn below(&mut self, bound: usize) -> usize;

    /// Uniform integer in `[lo, hi]` (inclusive).
    ///
    /// An empty range (`hi < lo`) yields `lo`, which is what the partition
    /// bands rely on when a region is only two lines wide.
    fn randint(&mut self, lo: usize, hi: usize) -> usize {
        if hi < lo {
            return lo;
        }
        lo + self.below(hi - lo + 1)
    }

    /// Fisher-Yates shuffle in place.
    fn shuffle<T>(&mut self, items: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..items.len()).rev() {
            let j = self.below(i + 1);
            items.swap(i, j);
        }
    }
}

/// Park-Miller Linear Congruential Generator
///
/// Generates a deterministic sequence of pseudo-random numbers from a seed.
/// Same seed always produces the same sequence.
#[derive(Clone, Debug)]
pub struct SimpleLCG {
    state: u32,
}

impl SimpleLCG {
    /// Create a new LCG with the given seed
    ///
    /// Seeds that are a multiple of the modulus would lock the sequence at
    /// zero, so they are replaced with 1.
    pub fn new(seed: u32) -> Self {
        let state = (seed as u64 % MODULUS) as u32;
        Self {
            state: if state == 0 { 1 } else { state },
        }
    }

    /// Advance RNG state and return it
    fn advance(&mut self) -> u32 {
        // u64 keeps the multiplication from overflowing
        self.state = ((self.state as u64 * MULTIPLIER) % MODULUS) as u32;
        self.state
    }
}

impl RandomSource for SimpleLCG {
    /// Pure integer arithmetic: `(state * bound) / M`
    fn below(&mut self, bound: usize) -> usize {
        let state = self.advance() as u64;
        ((state * bound as u64) / MODULUS) as usize
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn below(&mut self, bound: usize) -> usize {
        (**self).below(bound)
    }
}
