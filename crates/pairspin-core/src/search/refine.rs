//! Final hill-climb over the best sequence found by the beam search.

use tracing::debug;

use super::{Run, SearchNode};
use crate::{generate_candidates, Clock, Grid, RandomSource, Result, Rotation};

impl<C: Clock, R: RandomSource> Run<'_, C, R> {
    /// Replay `moves` onto `initial` and greedily extend the sequence while
    /// some sampled candidate strictly improves the pairing.
    ///
    /// Returns the number of accepted steps.
    pub(super) fn refine(&mut self, initial: &Grid, moves: &[Rotation]) -> Result<usize> {
        let budget = self.budget.narrowed(self.config.refinement_time_budget);

        let mut grid = initial.clone();
        for rotation in moves {
            grid.apply(rotation)?;
        }
        let mut current = SearchNode::new(grid, moves.to_vec(), 0, &self.config.weights, &mut *self.rng);
        let mut accepted = 0usize;

        for _ in 0..self.config.refinement_attempts {
            if current.is_solved() || budget.exhausted() {
                break;
            }

            let candidates = generate_candidates(
                &current.grid,
                &self.config.rotation_sizes,
                current.last_move(),
                Some(&current.metrics),
            );

            let mut best: Option<SearchNode> = None;
            for rotation in candidates.into_iter().take(self.config.refinement_sample) {
                if budget.exhausted() {
                    break;
                }
                let child = current.child(rotation, 1, &self.config.weights, &mut *self.rng)?;
                self.explored += 1;

                // fewer unmatched pairs, or as many with less distance
                if !child.metrics.improves_on(&current.metrics) {
                    continue;
                }
                if best.as_ref().map_or(true, |b| child.metrics.improves_on(&b.metrics)) {
                    best = Some(child);
                }
            }

            match best {
                Some(next) => {
                    current = next;
                    accepted += 1;
                    self.tracker.offer_improvement(&current);
                }
                None => break,
            }
        }

        debug!(
            accepted,
            unmatched = current.metrics.status.unmatched,
            distance = current.metrics.combined_distance(),
            "refinement finished"
        );
        Ok(accepted)
    }
}
