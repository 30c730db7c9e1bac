//! Random sources.
//!
//! [`SeededRandom`] wraps `StdRng` so a run can be replayed from its seed.
//! [`FixedRandom`] returns the same roll every time, for tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::app::ports::RandomSource;

/// `StdRng`-backed randomness.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn chance(&mut self, p: f64) -> bool {
        self.rng.r#gen::<f64>() < p.clamp(0.0, 1.0)
    }

    fn between(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..=high)
    }
}

/// Deterministic source: every `chance(p)` compares `roll < p`, every
/// `between` returns the low end.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom {
    roll: f64,
}

impl FixedRandom {
    /// `roll` of `0.0` makes every non-zero chance succeed; `1.0` makes every
    /// chance fail.
    pub fn new(roll: f64) -> Self {
        Self { roll }
    }
}

impl RandomSource for FixedRandom {
    fn chance(&mut self, p: f64) -> bool {
        self.roll < p
    }

    fn between(&mut self, low: u32, _high: u32) -> u32 {
        low
    }
}
