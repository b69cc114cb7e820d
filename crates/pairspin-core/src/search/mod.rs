//! Beam-stack search orchestrator.
//!
//! Runs escalating beam expansions from a moving root, shakes the root when
//! an iteration makes no progress, and finishes with a greedy hill-climb over
//! the best sequence found.

mod beam;
mod node;
mod refine;
mod shake;
mod tracker;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clock::Budget;
use crate::{
    Clock, Grid, MonotonicClock, PairStatus, Problem, RandomSource, Result, Rotation, SearchConfig,
    SearchLimits, SeededRandom,
};
use beam::IterationStatus;

pub use node::SearchNode;
pub use tracker::BestTracker;

/// Outcome of a solve: the best sequence found and how it was found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub moves: Vec<Rotation>,
    pub status: PairStatus,
    pub solved: bool,
    pub explored_nodes: usize,
    pub elapsed: Duration,
    pub score: f64,
}

impl SearchResult {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }
}

/// Beam-stack solver with injected clock and random source.
pub struct BeamStackSolver<C: Clock = MonotonicClock, R: RandomSource = SeededRandom> {
    config: SearchConfig,
    clock: C,
    rng: R,
}

impl BeamStackSolver {
    /// Solver on the wall clock with an OS-seeded random source.
    pub fn new(config: SearchConfig) -> Result<Self> {
        Self::with_capabilities(config, MonotonicClock::new(), SeededRandom::new())
    }
}

impl<C: Clock, R: RandomSource> BeamStackSolver<C, R> {
    pub fn with_capabilities(config: SearchConfig, clock: C, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, clock, rng })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Solve a puzzle instance. Fails only if the instance is malformed.
    pub fn solve(&mut self, problem: &Problem) -> Result<SearchResult> {
        let grid = problem.make_grid()?;
        self.solve_grid(&grid)
    }

    /// Search from `initial` until solved or out of budget, returning the
    /// best sequence observed.
    pub fn solve_grid(&mut self, initial: &Grid) -> Result<SearchResult> {
        self.clock.reset();
        let config = &self.config;

        let root = SearchNode::new(initial.clone(), Vec::new(), 0, &config.weights, &mut self.rng);
        info!(
            size = initial.size(),
            unmatched = root.metrics.status.unmatched,
            budget_ms = config.time_budget.as_millis() as u64,
            "beam-stack search started"
        );

        let budget = Budget::new(&self.clock, config.time_budget);
        let mut run = Run::new(config, budget, &mut self.rng, root.clone());

        if !root.is_solved() {
            run.outer_loop(root, initial.size())?;

            if !run.tracker.best().is_solved() && !run.budget.exhausted() {
                let moves = run.tracker.best().moves.clone();
                run.refine(initial, &moves)?;
            }
        }

        let explored_nodes = run.explored;
        let (expansions, shakes) = (run.expansions, run.shakes);
        let best = run.tracker.into_best();
        let result = SearchResult {
            solved: best.is_solved(),
            status: best.metrics.status,
            score: best.score,
            moves: best.moves,
            explored_nodes,
            elapsed: self.clock.elapsed(),
        };

        info!(
            solved = result.solved,
            unmatched = result.status.unmatched,
            moves = result.moves.len(),
            explored = result.explored_nodes,
            expansions,
            shakes,
            elapsed_ms = result.elapsed_ms(),
            "beam-stack search finished"
        );
        Ok(result)
    }
}

/// State shared by the phases of one solve.
struct Run<'a, C: Clock, R: RandomSource> {
    config: &'a SearchConfig,
    budget: Budget<'a, C>,
    rng: &'a mut R,
    tracker: BestTracker,
    explored: usize,
    expansions: usize,
    shakes: usize,
}

impl<'a, C: Clock, R: RandomSource> Run<'a, C, R> {
    fn new(config: &'a SearchConfig, budget: Budget<'a, C>, rng: &'a mut R, root: SearchNode) -> Self {
        Self {
            config,
            budget,
            rng,
            tracker: BestTracker::new(root),
            explored: 0,
            expansions: 0,
            shakes: 0,
        }
    }

    fn outer_loop(&mut self, mut root: SearchNode, board_size: usize) -> Result<()> {
        let config = self.config;
        let iterations = config.effective_outer_iterations();
        let base = if config.adaptive_limits {
            SearchLimits::scaled(config, board_size)
        } else {
            SearchLimits::from_config(config)
        };
        let shake_cutoff = config.time_budget.mul_f64(config.shake_time_ratio);

        let mut iteration = 0;
        let mut shake_attempts = 0;
        while iteration < iterations {
            if self.budget.exhausted() {
                break;
            }

            let limits = if config.adaptive_limits {
                base.escalated(iteration, config.beam_width_cap)
            } else {
                base
            };
            let outcome = self.expand(&root, &limits)?;
            self.expansions += 1;
            debug!(
                iteration,
                status = ?outcome.status,
                depth = outcome.depth_reached,
                explored = outcome.explored,
                beam = limits.beam_width,
                best_score = self.tracker.best_score(),
                "outer iteration finished"
            );

            if outcome.status == IterationStatus::Solved {
                return Ok(());
            }

            let improved = outcome
                .best_unsolved
                .filter(|best| best.metrics.improves_on(&root.metrics));
            if let Some(best) = improved {
                root = best;
                shake_attempts = 0;
                iteration += 1;
                continue;
            }

            // retry rejected shakes without re-expanding; an accepted one
            // becomes the root for another expansion at the same limits
            let mut shaken_root = None;
            while shake_attempts < config.shake_attempts
                && !self.budget.exhausted()
                && self.budget.elapsed() < shake_cutoff
            {
                shake_attempts += 1;
                self.shakes += 1;
                if let Some(shaken) = self.shake(&root)? {
                    if shaken.is_solved() {
                        return Ok(());
                    }
                    shaken_root = Some(shaken);
                    break;
                }
            }
            if let Some(shaken) = shaken_root {
                root = shaken;
                continue;
            }

            shake_attempts = 0;
            iteration += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solved_4x4() -> Problem {
        Problem::new(4, vec![0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7]).unwrap()
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SearchConfig {
            beam_width: 0,
            ..SearchConfig::quick()
        };
        assert!(BeamStackSolver::new(config).is_err());
    }

    #[test]
    fn test_solved_input_returns_immediately() {
        let mut solver = BeamStackSolver::with_capabilities(
            SearchConfig::quick(),
            MonotonicClock::new(),
            SeededRandom::with_seed(1),
        )
        .unwrap();
        let result = solver.solve(&solved_4x4()).unwrap();
        assert!(result.solved);
        assert!(result.moves.is_empty());
        assert_eq!(result.explored_nodes, 0);
        assert_eq!(result.status, PairStatus { matched: 8, unmatched: 0 });
    }

    #[test]
    fn test_result_replays_to_reported_status() {
        let problem = Problem::new(4, vec![0, 1, 2, 3, 4, 5, 6, 7, 7, 6, 5, 4, 3, 2, 1, 0]).unwrap();
        let mut solver = BeamStackSolver::with_capabilities(
            SearchConfig::quick().with_time_budget(Duration::from_millis(500)),
            MonotonicClock::new(),
            SeededRandom::with_seed(99),
        )
        .unwrap();
        let result = solver.solve(&problem).unwrap();

        let replayed = problem.replay(&result.moves).unwrap();
        assert_eq!(replayed.evaluate_pairs(), result.status);
        assert_eq!(replayed.is_goal_state(), result.solved);
        assert_eq!(result.move_count(), result.moves.len());
    }

    /// Time stands still at a fixed point of the budget.
    struct FrozenClock(Duration);

    impl Clock for FrozenClock {
        fn reset(&mut self) {}

        fn elapsed(&self) -> Duration {
            self.0
        }
    }

    /// Walks of one step, no jitter, tie draw 0.0.
    struct LowRandom;

    impl RandomSource for LowRandom {
        fn int_in(&mut self, low: usize, _high: usize) -> usize {
            low
        }
        fn real_in(&mut self, low: f64, _high: f64) -> f64 {
            low
        }
    }

    /// Run the outer loop on a 2x2 board with both pairs on diagonals: no
    /// iteration ever improves and every shake ties the root.
    /// Returns `(expansions, shakes)`.
    fn stalled_outer_loop(config: &SearchConfig, now: Duration) -> (usize, usize) {
        let clock = FrozenClock(now);
        let mut rng = LowRandom;
        let grid = Grid::new(2, vec![0, 1, 1, 0]).unwrap();
        let root = SearchNode::new(grid, Vec::new(), 0, &config.weights, &mut rng);
        let budget = Budget::new(&clock, config.time_budget);
        let mut run = Run::new(config, budget, &mut rng, root.clone());
        run.outer_loop(root, 2).unwrap();
        assert!(!run.tracker.best().is_solved());
        (run.expansions, run.shakes)
    }

    fn stalled_config(accept_probability: f64) -> SearchConfig {
        SearchConfig {
            outer_iterations: 3,
            shake_attempts: 2,
            shake_equal_accept_probability: accept_probability,
            ..SearchConfig::quick()
        }
    }

    #[test]
    fn test_rejected_shakes_do_not_repeat_expansion() {
        let (expansions, shakes) = stalled_outer_loop(&stalled_config(0.0), Duration::ZERO);
        // one expansion per iteration, then every attempt spent before advancing
        assert_eq!(expansions, 3);
        assert_eq!(shakes, 6);
    }

    #[test]
    fn test_accepted_shake_is_expanded_before_advancing() {
        let (expansions, shakes) = stalled_outer_loop(&stalled_config(1.0), Duration::ZERO);
        // per iteration: expand, shake, expand, shake, expand
        assert_eq!(expansions, 9);
        assert_eq!(shakes, 6);
    }

    #[test]
    fn test_no_shaking_past_time_cutoff() {
        let config = stalled_config(1.0);
        let past_cutoff = config.time_budget.mul_f64((config.shake_time_ratio + 1.0) / 2.0);
        assert!(past_cutoff < config.time_budget);

        let (expansions, shakes) = stalled_outer_loop(&config, past_cutoff);
        assert_eq!(shakes, 0);
        assert_eq!(expansions, 3);
    }
}
