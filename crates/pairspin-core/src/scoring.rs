use serde::{Deserialize, Serialize};

use crate::{PairMetrics, RandomSource};

/// Scale applied to the uniform tie-breaking draw.
pub const JITTER_SCALE: f64 = 1e-3;

/// Weights of the linear node score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub matched: f64,
    pub unmatched: f64,
    pub total_distance: f64,
    pub max_distance: f64,
    /// Per layer below the current iteration root.
    pub depth: f64,
    /// Per move since the original instance.
    pub moves: f64,
    /// Added once no pair is unmatched.
    pub solved_bonus: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            matched: 10_000.0,
            unmatched: 2_000.0,
            total_distance: 50.0,
            max_distance: 25.0,
            depth: 0.5,
            moves: 0.1,
            solved_bonus: 1_000_000.0,
        }
    }
}

impl ScoreWeights {
    /// Score a state. Draws a fresh jitter from `rng` on every call so that
    /// equal states spread out across the beam.
    pub fn score<R: RandomSource>(
        &self,
        metrics: &PairMetrics,
        depth: usize,
        move_count: usize,
        rng: &mut R,
    ) -> f64 {
        let status = metrics.status;
        let mut score = self.matched * status.matched as f64
            - self.unmatched * status.unmatched as f64
            - self.total_distance * metrics.total_unmatched_distance as f64
            - self.max_distance * metrics.max_unmatched_distance as f64
            - self.depth * depth as f64
            - self.moves * move_count as f64
            + rng.real_in(0.0, 1.0) * JITTER_SCALE;

        if status.unmatched == 0 {
            score += self.solved_bonus;
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PairStatus, SeededRandom};

    struct NoJitter;

    impl RandomSource for NoJitter {
        fn int_in(&mut self, low: usize, _high: usize) -> usize {
            low
        }
        fn real_in(&mut self, low: f64, _high: f64) -> f64 {
            low
        }
    }

    fn metrics(matched: usize, unmatched: usize, total: usize, max: usize) -> PairMetrics {
        PairMetrics {
            status: PairStatus { matched, unmatched },
            total_unmatched_distance: total,
            max_unmatched_distance: max,
            unmatched_mask: Vec::new(),
        }
    }

    #[test]
    fn test_linear_combination() {
        let weights = ScoreWeights {
            matched: 10.0,
            unmatched: 3.0,
            total_distance: 2.0,
            max_distance: 1.0,
            depth: 0.5,
            moves: 0.25,
            solved_bonus: 1e6,
        };
        let score = weights.score(&metrics(5, 3, 7, 4), 2, 4, &mut NoJitter);
        assert_eq!(score, 50.0 - 9.0 - 14.0 - 4.0 - 1.0 - 1.0);
    }

    #[test]
    fn test_solved_outranks_unsolved() {
        let weights = ScoreWeights::default();
        let solved = weights.score(&metrics(8, 0, 0, 0), 200, 200, &mut NoJitter);
        let nearly = weights.score(&metrics(7, 1, 3, 3), 0, 0, &mut NoJitter);
        assert!(solved > nearly);
    }

    #[test]
    fn test_jitter_is_small_and_fresh() {
        let weights = ScoreWeights::default();
        let m = metrics(6, 2, 5, 3);
        let base = weights.score(&m, 1, 1, &mut NoJitter);
        let mut rng = SeededRandom::with_seed(3);
        let draws: Vec<f64> = (0..8).map(|_| weights.score(&m, 1, 1, &mut rng)).collect();

        for &d in &draws {
            assert!(d >= base && d <= base + JITTER_SCALE);
        }
        assert!(draws.windows(2).any(|w| w[0] != w[1]));
    }
}
