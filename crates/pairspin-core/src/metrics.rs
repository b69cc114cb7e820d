use serde::{Deserialize, Serialize};

/// Matched/unmatched pair counts over every token id in a grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairStatus {
    pub matched: usize,
    pub unmatched: usize,
}

impl PairStatus {
    /// True when every pair in a grid of `cell_count` cells is adjacent.
    ///
    /// The multiplicity check rejects grids where some id does not appear
    /// exactly twice.
    pub fn is_goal(&self, cell_count: usize) -> bool {
        self.unmatched == 0 && self.matched * 2 == cell_count
    }
}

/// Pair status plus the distance profile of the pairs that still need work.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairMetrics {
    pub status: PairStatus,
    pub total_unmatched_distance: usize,
    pub max_unmatched_distance: usize,
    /// Row-major, `true` for cells that belong to an unmatched pair.
    pub unmatched_mask: Vec<bool>,
}

impl PairMetrics {
    /// Distance figure used to compare states with the same unmatched count.
    pub fn combined_distance(&self) -> usize {
        self.total_unmatched_distance + self.max_unmatched_distance
    }

    /// Ordering key: fewer unmatched pairs first, then lower combined distance.
    pub fn quality(&self) -> (usize, usize) {
        (self.status.unmatched, self.combined_distance())
    }

    /// Strictly better pairing than `other`.
    pub fn improves_on(&self, other: &PairMetrics) -> bool {
        self.quality() < other.quality()
    }

    pub fn ties_with(&self, other: &PairMetrics) -> bool {
        self.quality() == other.quality()
    }

    pub fn has_mask(&self) -> bool {
        !self.unmatched_mask.is_empty()
    }
}
