//! Plateau escape: a short random walk from the current root.

use tracing::trace;

use super::{Run, SearchNode};
use crate::{generate_candidates, Clock, RandomSource, Result};

/// Walk steps draw from at most this many of the top-ranked candidates.
const SHAKE_POOL: usize = 64;

impl<C: Clock, R: RandomSource> Run<'_, C, R> {
    /// Perturb `root` and return the perturbed node if it is accepted as the
    /// new root.
    pub(super) fn shake(&mut self, root: &SearchNode) -> Result<Option<SearchNode>> {
        let steps = self.rng.int_in(1, self.config.shake_max_length.max(1));
        let mut node = root.clone();
        let mut walked = 0usize;

        for step in 0..steps {
            if self.budget.exhausted() {
                break;
            }
            let candidates = generate_candidates(
                &node.grid,
                &self.config.rotation_sizes,
                node.last_move(),
                Some(&node.metrics),
            );
            if candidates.is_empty() {
                break;
            }

            let pool = candidates.len().min(SHAKE_POOL);
            let pick = candidates[self.rng.int_in(0, pool - 1)];
            node = node.child(pick, step + 1, &self.config.weights, &mut *self.rng)?;
            walked += 1;
            self.explored += 1;
            self.tracker.offer(&node);

            if node.is_solved() {
                break;
            }
        }

        if walked == 0 {
            return Ok(None);
        }

        let accepted = node.is_solved()
            || node.metrics.improves_on(&root.metrics)
            || (node.metrics.ties_with(&root.metrics)
                && self.rng.real_in(0.0, 1.0) < self.config.shake_equal_accept_probability);

        trace!(
            steps = walked,
            unmatched = node.metrics.status.unmatched,
            root_unmatched = root.metrics.status.unmatched,
            accepted,
            "shake"
        );

        Ok(accepted.then_some(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Budget;
    use crate::{Grid, MonotonicClock, ScoreWeights, SearchConfig, SeededRandom};
    use std::time::Duration;

    fn shake_once(config: &SearchConfig, cells: Vec<u32>, seed: u64) -> (SearchNode, Option<SearchNode>) {
        let clock = MonotonicClock::new();
        let mut rng = SeededRandom::with_seed(seed);
        let grid = Grid::new(4, cells).unwrap();
        let root = SearchNode::new(grid, Vec::new(), 0, &ScoreWeights::default(), &mut rng);
        let budget = Budget::new(&clock, Duration::from_secs(30));
        let mut run = Run::new(config, budget, &mut rng, root.clone());
        let shaken = run.shake(&root).unwrap();
        (root, shaken)
    }

    #[test]
    fn test_accepted_shakes_never_regress() {
        let config = SearchConfig {
            shake_max_length: 5,
            shake_equal_accept_probability: 0.0,
            ..SearchConfig::quick()
        };
        let cells = vec![0, 1, 2, 3, 4, 5, 6, 7, 7, 6, 5, 4, 3, 2, 1, 0];
        for seed in 0..40 {
            let (root, shaken) = shake_once(&config, cells.clone(), seed);
            if let Some(node) = shaken {
                assert!(node.is_solved() || node.metrics.improves_on(&root.metrics));
                assert!(!node.moves.is_empty() && node.moves.len() <= 5);
                assert_eq!(node.grid, replay(&root.grid, &node.moves));
            }
        }
    }

    #[test]
    fn test_walk_length_is_bounded() {
        let config = SearchConfig {
            shake_max_length: 3,
            shake_equal_accept_probability: 1.0,
            ..SearchConfig::quick()
        };
        let cells = vec![0, 1, 2, 3, 4, 5, 6, 7, 7, 6, 5, 4, 3, 2, 1, 0];
        for seed in 0..20 {
            let (_, shaken) = shake_once(&config, cells.clone(), seed);
            if let Some(node) = shaken {
                assert!((1..=3).contains(&node.moves.len()));
            }
        }
    }

    /// Always draws the low end: walks of one step, no jitter, tie draw 0.0.
    struct LowRandom;

    impl RandomSource for LowRandom {
        fn int_in(&mut self, low: usize, _high: usize) -> usize {
            low
        }
        fn real_in(&mut self, low: f64, _high: f64) -> f64 {
            low
        }
    }

    fn shake_2x2_diagonals(accept_probability: f64) -> (SearchNode, Option<SearchNode>) {
        let config = SearchConfig {
            shake_equal_accept_probability: accept_probability,
            ..SearchConfig::quick()
        };
        let clock = MonotonicClock::new();
        let mut rng = LowRandom;
        // the whole-board turn keeps both pairs diagonal: every walk ties
        let grid = Grid::new(2, vec![0, 1, 1, 0]).unwrap();
        let root = SearchNode::new(grid, Vec::new(), 0, &config.weights, &mut rng);
        let budget = Budget::new(&clock, Duration::from_secs(30));
        let mut run = Run::new(&config, budget, &mut rng, root.clone());
        let shaken = run.shake(&root).unwrap();
        (root, shaken)
    }

    #[test]
    fn test_exact_tie_is_accepted_at_probability_one() {
        let (root, shaken) = shake_2x2_diagonals(1.0);
        let node = shaken.expect("tie accepted");
        assert!(node.metrics.ties_with(&root.metrics));
        assert_eq!(node.moves, vec![crate::Rotation::new(0, 0, 2)]);
        assert_ne!(node.grid, root.grid);
    }

    #[test]
    fn test_exact_tie_is_rejected_at_probability_zero() {
        let (_, shaken) = shake_2x2_diagonals(0.0);
        assert!(shaken.is_none());
    }

    fn replay(grid: &Grid, moves: &[crate::Rotation]) -> Grid {
        let mut grid = grid.clone();
        for rot in moves {
            grid.apply(rot).unwrap();
        }
        grid
    }
}
