//! Random source for spawn rolls
//!
//! Every random branch in the sim goes through [`RandomSource`] so runs can be
//! seeded or scripted.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform draws in `[0, 1)`
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;

    /// `true` with probability `p`
    fn chance(&mut self, p: f32) -> bool {
        self.next_unit() < p
    }

    /// Uniform float in `[lo, hi)`. An empty range yields `lo`.
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        let u = self.next_unit() as f64;
        if hi <= lo {
            return lo;
        }
        // f32 rounding can land exactly on `hi` for draws just under 1
        let v = (lo as f64 + u * (hi as f64 - lo as f64)) as f32;
        if v >= hi { below(hi).max(lo) } else { v.max(lo) }
    }

    /// Uniform index in `0..len` (`len` must be non-zero)
    fn index(&mut self, len: usize) -> usize {
        let i = (self.next_unit() * len as f32) as usize;
        i.min(len.saturating_sub(1))
    }
}

/// Largest f32 strictly less than `x` (finite `x`)
fn below(x: f32) -> f32 {
    if x == 0.0 {
        -f32::from_bits(1)
    } else if x > 0.0 {
        f32::from_bits(x.to_bits() - 1)
    } else {
        f32::from_bits(x.to_bits() + 1)
    }
}

/// Seeded PCG generator (the default for real runs)
#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: u64,
    rng: Pcg32,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRng {
    fn next_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Replays a fixed list of draws, then repeats `fallback`
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    draws: VecDeque<f32>,
    fallback: f32,
}

impl ScriptedRng {
    pub fn new(draws: impl IntoIterator<Item = f32>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            fallback: 0.999,
        }
    }

    /// Value returned once the script runs out (default 0.999: nothing fires)
    pub fn with_fallback(mut self, fallback: f32) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn push(&mut self, draw: f32) {
        self.draws.push_back(draw);
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for ScriptedRng {
    fn next_unit(&mut self) -> f32 {
        self.draws.pop_front().unwrap_or(self.fallback)
    }
}
