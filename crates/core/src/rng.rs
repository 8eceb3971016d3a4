//! RNG module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomization algorithm used in modern Tetris.
//! Each bag contains one of each piece (I, O, T, S, Z, J, L), shuffled.
//! Draws pop from the bag until it is empty, then a new bag is shuffled.
//!
//! The random source is injectable: the built-in LCG keeps games reproducible
//! from a `u32` seed, and any `rand` generator can be used instead.

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::Rng;

use crate::types::PieceKind;

/// Uniform integer source used for shuffling
pub trait RandomSource {
    /// Uniform value in `[0, bound)`; `bound` is at least 1
    fn next_below(&mut self, bound: u32) -> u32;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
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

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_below(&mut self, bound: u32) -> u32 {
        // Multiply-shift: maps the high bits onto [0, bound)
        ((self.next_u32() as u64 * bound.max(1) as u64) >> 32) as u32
    }
}

impl RandomSource for StdRng {
    fn next_below(&mut self, bound: u32) -> u32 {
        self.gen_range(0..bound.max(1))
    }
}

/// Shuffle a slice using Fisher-Yates
pub fn shuffle<T, R: RandomSource + ?Sized>(rng: &mut R, slice: &mut [T]) {
    for i in (1..slice.len()).rev() {
        let j = rng.next_below((i + 1) as u32) as usize;
        slice.swap(i, j);
    }
}

/// 7-bag piece generator
///
/// The bag starts empty; the first draw shuffles a fresh one.
#[derive(Debug, Clone)]
pub struct Randomizer<R = SimpleRng> {
    /// Remaining pieces of the current bag; drawn from the back
    bag: ArrayVec<PieceKind, 7>,
    rng: R,
}

impl Randomizer<SimpleRng> {
    /// Randomizer over the built-in LCG
    pub fn new(seed: u32) -> Self {
        Self::with_source(SimpleRng::new(seed))
    }
}

impl<R: RandomSource> Randomizer<R> {
    pub fn with_source(rng: R) -> Self {
        Self {
            bag: ArrayVec::new(),
            rng,
        }
    }

    fn refill_bag(&mut self) {
        self.bag.clear();
        self.bag.extend(PieceKind::ALL);
        shuffle(&mut self.rng, &mut self.bag);
    }

    /// Draw the next piece; the sequence never ends
    pub fn next(&mut self) -> PieceKind {
        loop {
            if let Some(kind) = self.bag.pop() {
                return kind;
            }
            self.refill_bag();
        }
    }

    /// Drop the current bag so the next draw starts a fresh shuffle
    pub fn reset(&mut self) {
        self.bag.clear();
    }

    /// Pieces left in the current bag
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag
    }

    pub fn source(&self) -> &R {
        &self.rng
    }
}

impl Default for Randomizer<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}
