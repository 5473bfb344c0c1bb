//! RNG module - injectable randomness for spawns and coin flips
//!
//! Every random decision in the arcade goes through [`RandomSource`], so a game
//! can run on a seeded generator (reproducible sessions, tests) or on any
//! `rand` generator.
//!
//! Also provides a simple LCG for deterministic play and testing.

use rand::rngs::StdRng;
use rand::Rng;

/// Source of the two kinds of randomness the games need.
pub trait RandomSource {
    /// Uniform index in `[0, len)`. `len` is never zero.
    fn next_index(&mut self, len: usize) -> usize;

    /// Uniform float in `[0, 1)`
    fn next_unit(&mut self) -> f64;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Seed from the thread-local entropy source
    pub fn from_entropy() -> Self {
        Self::new(rand::random::<u32>())
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales from the high bits; the low bits of an LCG have short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current internal state (for restarting with the same sequence)
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RandomSource for SimpleRng {
    fn next_index(&mut self, len: usize) -> usize {
        self.next_range(len as u32) as usize
    }

    fn next_unit(&mut self) -> f64 {
        // 24 high bits give an exactly representable fraction.
        (self.next_u32() >> 8) as f64 / (1u32 << 24) as f64
    }
}

impl RandomSource for StdRng {
    fn next_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }

    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}
