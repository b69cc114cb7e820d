//! Uniform random source consumed by the search.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Capability the engine draws all randomness from.
///
/// Any implementation works; tests substitute deterministic fakes.
pub trait RandomSource {
    /// Uniform integer in `low..=high`. Returns `low` when the range is empty.
    fn int_in(&mut self, low: usize, high: usize) -> usize;

    /// Uniform real in `low..high`. Returns `low` when the range is empty.
    fn real_in(&mut self, low: f64, high: f64) -> f64;
}

/// Production random source backed by `StdRng`.
pub struct SeededRandom {
    rng: StdRng,
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl SeededRandom {
    /// Seed from the operating system.
    pub fn new() -> Self {
        let mut seed_bytes = [0u8; 8];
        getrandom::getrandom(&mut seed_bytes).unwrap_or_else(|_| {
            // Fallback: use a static counter if getrandom fails
            static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);
            let counter = COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            seed_bytes = counter.to_le_bytes();
        });
        Self::with_seed(u64::from_le_bytes(seed_bytes))
    }

    /// Reproducible stream for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn int_in(&mut self, low: usize, high: usize) -> usize {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..=high)
    }

    fn real_in(&mut self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..high)
    }
}
