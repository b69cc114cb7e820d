//! Search engine for the pair-forming rotation puzzle.
//!
//! An N x N grid holds N²/2 tokens, each in exactly two cells. A move rotates
//! a k x k window 90 degrees clockwise; the goal is every pair of equal tokens
//! orthogonally adjacent. [`BeamStackSolver`] looks for a short move sequence
//! within a wall-clock budget.
//!
//! ```no_run
//! use pairspin_core::{BeamStackSolver, Problem, SearchConfig};
//!
//! let problem = Problem::new(4, vec![0, 1, 2, 3, 4, 5, 6, 7, 7, 6, 5, 4, 3, 2, 1, 0])?;
//! let mut solver = BeamStackSolver::new(SearchConfig::quick())?;
//! let result = solver.solve(&problem)?;
//! println!("{} moves, solved: {}", result.moves.len(), result.solved);
//! # Ok::<(), pairspin_core::PuzzleError>(())
//! ```

mod candidates;
mod clock;
mod config;
mod error;
mod grid;
mod limits;
mod metrics;
mod problem;
mod random;
mod rotation;
mod scoring;
mod search;

pub use candidates::{enumerate_rotations, generate_candidates, MaskPrefix};
pub use clock::{Clock, MonotonicClock};
pub use config::SearchConfig;
pub use error::{PuzzleError, Result};
pub use grid::{Grid, Position, Token};
pub use limits::SearchLimits;
pub use metrics::{PairMetrics, PairStatus};
pub use problem::Problem;
pub use random::{RandomSource, SeededRandom};
pub use rotation::Rotation;
pub use scoring::{ScoreWeights, JITTER_SCALE};
pub use search::{BeamStackSolver, BestTracker, SearchNode, SearchResult};
