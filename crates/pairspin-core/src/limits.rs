//! Per-run resource caps derived from the configured bases.

use crate::SearchConfig;

const BEAM_EXPONENT: f64 = 1.35;
const DEPTH_EXPONENT: f64 = 1.25;
const NODE_EXPONENT: f64 = 3.0;
const CHILD_EXPONENT: f64 = 1.1;

/// Boards up to this side get the floors below.
const SMALL_BOARD: usize = 8;
const SMALL_BOARD_MIN_DEPTH: usize = 32;
const SMALL_BOARD_MIN_NODES: usize = 20_000;
const SMALL_BOARD_MIN_CHILDREN: usize = 24;

/// Caps applied to one outer iteration of the beam-stack search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub beam_width: usize,
    pub max_depth: usize,
    pub max_nodes: usize,
    pub max_children_per_node: usize,
}

impl SearchLimits {
    /// The configured bases, untouched apart from the beam ceiling.
    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            beam_width: config.beam_width.min(config.beam_width_cap),
            max_depth: config.max_depth,
            max_nodes: config.max_nodes,
            max_children_per_node: config.max_children_per_node,
        }
    }

    /// Bases scaled super-linearly with the board side.
    pub fn scaled(config: &SearchConfig, board_size: usize) -> Self {
        let factor = (board_size as f64 / 8.0).max(1.0);
        let scale = |base: usize, exponent: f64| -> usize {
            ((base as f64) * factor.powf(exponent)).round().max(1.0) as usize
        };

        let mut limits = Self {
            beam_width: scale(config.beam_width, BEAM_EXPONENT).min(config.beam_width_cap),
            max_depth: scale(config.max_depth, DEPTH_EXPONENT),
            max_nodes: scale(config.max_nodes, NODE_EXPONENT),
            max_children_per_node: scale(config.max_children_per_node, CHILD_EXPONENT),
        };

        if board_size <= SMALL_BOARD {
            limits.max_depth = limits.max_depth.max(SMALL_BOARD_MIN_DEPTH);
            limits.max_nodes = limits.max_nodes.max(SMALL_BOARD_MIN_NODES);
            limits.max_children_per_node = limits.max_children_per_node.max(SMALL_BOARD_MIN_CHILDREN);
        }
        limits
    }

    /// Widened caps for outer iteration `iteration` (0-based). Iteration 0
    /// returns the caps unchanged.
    pub fn escalated(&self, iteration: usize, beam_width_cap: usize) -> Self {
        if iteration == 0 {
            return *self;
        }
        let i = iteration as f64;
        let grow = |base: usize, rate: f64| -> usize { ((base as f64) * (1.0 + rate * i)).round() as usize };

        Self {
            beam_width: grow(self.beam_width, 0.45).min(beam_width_cap).max(1),
            max_depth: self.max_depth.saturating_add(10 * iteration),
            max_nodes: grow(self.max_nodes, 0.6),
            max_children_per_node: self
                .max_children_per_node
                .saturating_add((5 * iteration).max(8)),
        }
    }
}
