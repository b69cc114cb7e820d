use super::SearchNode;

/// Best node observed during one solve; replace-if-better only.
#[derive(Debug, Clone)]
pub struct BestTracker {
    best: SearchNode,
}

impl BestTracker {
    pub fn new(seed: SearchNode) -> Self {
        Self { best: seed }
    }

    /// Adopt `node` if it scores higher, or if it is the first solved node.
    /// Returns whether the tracked best changed.
    pub fn offer(&mut self, node: &SearchNode) -> bool {
        let solved_upgrade = node.is_solved() && !self.best.is_solved();
        let solved_downgrade = !node.is_solved() && self.best.is_solved();
        if solved_upgrade || (!solved_downgrade && node.score > self.best.score) {
            self.best = node.clone();
            return true;
        }
        false
    }

    /// Adopt a step of the final hill-climb: like [`offer`](Self::offer), but
    /// an unsolved node with better pairing quality also wins regardless of
    /// score.
    pub fn offer_improvement(&mut self, node: &SearchNode) -> bool {
        if !self.best.is_solved() && !node.is_solved() && node.metrics.improves_on(&self.best.metrics) {
            self.best = node.clone();
            return true;
        }
        self.offer(node)
    }

    pub fn best(&self) -> &SearchNode {
        &self.best
    }

    pub fn best_score(&self) -> f64 {
        self.best.score
    }

    pub fn into_best(self) -> SearchNode {
        self.best
    }
}
