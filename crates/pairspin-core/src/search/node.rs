use crate::{Grid, PairMetrics, PairStatus, RandomSource, Result, Rotation, ScoreWeights};

/// One state in the search: an owned grid plus the moves that produced it.
#[derive(Debug, Clone)]
pub struct SearchNode {
    pub grid: Grid,
    pub moves: Vec<Rotation>,
    pub metrics: PairMetrics,
    pub score: f64,
    pub hash: u64,
}

impl SearchNode {
    /// Evaluate `grid` reached through `moves`, `layer_depth` layers below
    /// the current iteration root.
    pub fn new<R: RandomSource>(
        grid: Grid,
        moves: Vec<Rotation>,
        layer_depth: usize,
        weights: &ScoreWeights,
        rng: &mut R,
    ) -> Self {
        let metrics = grid.evaluate_pair_metrics();
        let score = weights.score(&metrics, layer_depth, moves.len(), rng);
        let hash = grid.content_hash();
        Self {
            grid,
            moves,
            metrics,
            score,
            hash,
        }
    }

    /// Fork this node by applying `rotation` to a copy of its grid.
    pub fn child<R: RandomSource>(
        &self,
        rotation: Rotation,
        layer_depth: usize,
        weights: &ScoreWeights,
        rng: &mut R,
    ) -> Result<Self> {
        let grid = self.grid.applied(&rotation)?;
        let mut moves = Vec::with_capacity(self.moves.len() + 1);
        moves.extend_from_slice(&self.moves);
        moves.push(rotation);
        Ok(Self::new(grid, moves, layer_depth, weights, rng))
    }

    /// Number of moves from the original instance.
    pub fn depth(&self) -> usize {
        self.moves.len()
    }

    pub fn last_move(&self) -> Option<Rotation> {
        self.moves.last().copied()
    }

    pub fn status(&self) -> PairStatus {
        self.metrics.status
    }

    pub fn is_solved(&self) -> bool {
        self.metrics.status.is_goal(self.grid.cell_count())
    }

    /// Ordering used to pick the best unsolved node of an iteration: higher
    /// score, then fewer unmatched pairs, then lower total distance.
    pub fn outranks(&self, other: &SearchNode) -> bool {
        match self.score.total_cmp(&other.score) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Equal => {
                (self.metrics.status.unmatched, self.metrics.total_unmatched_distance)
                    < (other.metrics.status.unmatched, other.metrics.total_unmatched_distance)
            }
        }
    }
}

/// Keep the `keep` highest-scoring nodes, in no particular order.
pub(crate) fn retain_top(nodes: &mut Vec<SearchNode>, keep: usize) {
    if nodes.len() <= keep {
        return;
    }
    if keep == 0 {
        nodes.clear();
        return;
    }
    nodes.select_nth_unstable_by(keep - 1, |a, b| b.score.total_cmp(&a.score));
    nodes.truncate(keep);
}
