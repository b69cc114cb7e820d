//! Deterministic capabilities and instance builders shared by the
//! integration tests.
#![allow(dead_code)]

use std::cell::Cell;
use std::time::Duration;

use pairspin_core::{Clock, Problem, RandomSource};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Clock that advances by a fixed step every time it is read.
pub struct StepClock {
    now: Cell<Duration>,
    step: Duration,
}

impl StepClock {
    pub fn new(step: Duration) -> Self {
        Self {
            now: Cell::new(Duration::ZERO),
            step,
        }
    }

    pub fn reads(&self) -> u128 {
        self.now.get().as_nanos() / self.step.as_nanos().max(1)
    }
}

impl Clock for StepClock {
    fn reset(&mut self) {
        self.now.set(Duration::ZERO);
    }

    fn elapsed(&self) -> Duration {
        let now = self.now.get() + self.step;
        self.now.set(now);
        now
    }
}

/// Random source that always returns the low end of the range.
pub struct FixedRandom;

impl RandomSource for FixedRandom {
    fn int_in(&mut self, low: usize, _high: usize) -> usize {
        low
    }

    fn real_in(&mut self, low: f64, _high: f64) -> f64 {
        low
    }
}

/// Rows of horizontal dominoes; every pair adjacent. `size` must be even.
pub fn solved_problem(size: usize) -> Problem {
    let entities = (0..size * size).map(|i| (i / 2) as u32).collect();
    Problem::new(size, entities).unwrap()
}

/// Every token placed twice, positions shuffled by `seed`. `size` must be even.
pub fn shuffled_problem(size: usize, seed: u64) -> Problem {
    let mut entities: Vec<u32> = (0..size * size).map(|i| (i / 2) as u32).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    entities.shuffle(&mut rng);
    Problem::new(size, entities).unwrap()
}

/// Solved 4x4 with one 2x2 window turned counter-clockwise: tokens 0..3 sit
/// on diagonals and a single clockwise turn at (1, 0) restores the goal.
pub fn one_move_problem() -> Problem {
    Problem::new(4, vec![0, 1, 3, 1, 2, 0, 2, 3, 4, 4, 5, 5, 6, 6, 7, 7]).unwrap()
}
