use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{PuzzleError, Result, ScoreWeights};

/// Knobs of the beam-stack solver.
///
/// Limits are base values; with `adaptive_limits` on they are scaled by
/// board size and widened on every outer iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Nodes kept per layer
    pub beam_width: usize,
    /// Hard ceiling on the scaled beam width
    pub beam_width_cap: usize,
    /// Layers expanded per outer iteration
    pub max_depth: usize,
    /// Children evaluated per outer iteration
    pub max_nodes: usize,
    /// Children kept per parent before the adaptive bonus
    pub max_children_per_node: usize,
    /// Wall-clock budget for a whole solve
    pub time_budget: Duration,
    pub weights: ScoreWeights,
    /// Window sizes tried by the candidate generator, in enumeration order
    pub rotation_sizes: Vec<usize>,
    /// Skip children whose content hash was already seen this iteration
    pub dedup: bool,
    pub adaptive_limits: bool,
    pub outer_iterations: usize,
    pub shake_attempts: usize,
    pub shake_max_length: usize,
    /// Fraction of the time budget after which shaking stops
    pub shake_time_ratio: f64,
    /// Chance of accepting a shake that exactly ties the root
    pub shake_equal_accept_probability: f64,
    /// Maximum accepted steps of the final hill-climb
    pub refinement_attempts: usize,
    /// Ranked candidates inspected per hill-climb step
    pub refinement_sample: usize,
    pub refinement_time_budget: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            beam_width: 100,
            beam_width_cap: 2_000,
            max_depth: 60,
            max_nodes: 200_000,
            max_children_per_node: 50,
            time_budget: Duration::from_millis(290_000),
            weights: ScoreWeights::default(),
            rotation_sizes: vec![2, 3, 4, 5],
            dedup: true,
            adaptive_limits: true,
            outer_iterations: 6,
            shake_attempts: 3,
            shake_max_length: 6,
            shake_time_ratio: 0.85,
            shake_equal_accept_probability: 0.1,
            refinement_attempts: 200,
            refinement_sample: 64,
            refinement_time_budget: Duration::from_secs(5),
        }
    }
}

impl SearchConfig {
    /// Small budgets for interactive use and tests.
    pub fn quick() -> Self {
        Self {
            beam_width: 16,
            beam_width_cap: 64,
            max_depth: 12,
            max_nodes: 4_000,
            max_children_per_node: 12,
            time_budget: Duration::from_secs(2),
            outer_iterations: 3,
            shake_attempts: 2,
            shake_max_length: 4,
            refinement_attempts: 50,
            refinement_sample: 32,
            refinement_time_budget: Duration::from_millis(250),
            ..Self::default()
        }
    }

    /// Wider beams and more restarts for long runs on large boards.
    pub fn thorough() -> Self {
        Self {
            beam_width: 200,
            beam_width_cap: 4_000,
            max_depth: 120,
            max_nodes: 1_000_000,
            max_children_per_node: 80,
            outer_iterations: 10,
            shake_attempts: 5,
            shake_max_length: 10,
            refinement_attempts: 1_000,
            refinement_sample: 128,
            refinement_time_budget: Duration::from_secs(20),
            ..Self::default()
        }
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    pub fn with_rotation_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.rotation_sizes = sizes;
        self
    }

    pub fn with_adaptive_limits(mut self, enabled: bool) -> Self {
        self.adaptive_limits = enabled;
        self
    }

    pub fn with_dedup(mut self, enabled: bool) -> Self {
        self.dedup = enabled;
        self
    }

    /// Outer iterations actually run.
    pub fn effective_outer_iterations(&self) -> usize {
        if self.adaptive_limits {
            self.outer_iterations.max(1)
        } else {
            1
        }
    }

    /// Reject knob combinations the solver cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.beam_width == 0 {
            return Err(PuzzleError::config("beam width must be positive"));
        }
        if self.beam_width_cap < self.beam_width {
            return Err(PuzzleError::config(format!(
                "beam width cap {} is below beam width {}",
                self.beam_width_cap, self.beam_width
            )));
        }
        if self.max_depth == 0 || self.max_nodes == 0 || self.max_children_per_node == 0 {
            return Err(PuzzleError::config("depth, node and child caps must be positive"));
        }
        if self.rotation_sizes.is_empty() {
            return Err(PuzzleError::config("at least one rotation size is required"));
        }
        if let Some(&size) = self.rotation_sizes.iter().find(|&&k| k < 2) {
            return Err(PuzzleError::config(format!(
                "rotation size {} is below 2",
                size
            )));
        }
        if !(0.0..=1.0).contains(&self.shake_time_ratio) {
            return Err(PuzzleError::config("shake time ratio must lie in [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.shake_equal_accept_probability) {
            return Err(PuzzleError::config(
                "shake equal-acceptance probability must lie in [0, 1]",
            ));
        }
        if self.refinement_sample == 0 {
            return Err(PuzzleError::config("refinement sample must be positive"));
        }
        Ok(())
    }
}
