//! Grid state: cell storage, rotations, pairing metrics and content hashing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{PairMetrics, PairStatus, PuzzleError, Result, Rotation};

/// Token identifier stored in a cell.
pub type Token = u32;

const NOT_SEEN: usize = usize::MAX;

/// A cell coordinate; `x` is the column and `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn manhattan(&self, other: Position) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// An N x N board of tokens in row-major order.
///
/// Every search branch owns its grid; forking a branch clones it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    cells: Vec<Token>,
}

impl Grid {
    /// Build a grid, rejecting a zero size or a cell count other than size².
    pub fn new(size: usize, cells: Vec<Token>) -> Result<Self> {
        if size == 0 {
            return Err(PuzzleError::ZeroSize);
        }
        let expected = size * size;
        if cells.len() != expected {
            return Err(PuzzleError::CellCountMismatch {
                size,
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self { size, cells })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[Token] {
        &self.cells
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size
    }

    pub fn at(&self, x: usize, y: usize) -> Result<Token> {
        if !self.in_bounds(x, y) {
            return Err(self.out_of_range(x, y));
        }
        Ok(self.cells[y * self.size + x])
    }

    pub fn set(&mut self, x: usize, y: usize, value: Token) -> Result<()> {
        if !self.in_bounds(x, y) {
            return Err(self.out_of_range(x, y));
        }
        self.cells[y * self.size + x] = value;
        Ok(())
    }

    pub fn is_valid_rotation(&self, rotation: &Rotation) -> bool {
        rotation.is_valid(self.size)
    }

    /// Rotate the window described by `rotation` 90 degrees clockwise.
    pub fn apply(&mut self, rotation: &Rotation) -> Result<()> {
        if !self.is_valid_rotation(rotation) {
            return Err(PuzzleError::InvalidRotation {
                rotation: *rotation,
                size: self.size,
            });
        }

        let k = rotation.size;
        let n = self.size;
        let mut window = Vec::with_capacity(k * k);
        for dy in 0..k {
            let row = (rotation.y + dy) * n + rotation.x;
            window.extend_from_slice(&self.cells[row..row + k]);
        }

        // destination (dx, dy) takes window(row = k - 1 - dx, col = dy)
        for dy in 0..k {
            for dx in 0..k {
                self.cells[(rotation.y + dy) * n + rotation.x + dx] = window[(k - 1 - dx) * k + dy];
            }
        }
        Ok(())
    }

    /// Non-mutating variant of [`Grid::apply`].
    pub fn applied(&self, rotation: &Rotation) -> Result<Grid> {
        let mut next = self.clone();
        next.apply(rotation)?;
        Ok(next)
    }

    /// All positions holding `value`, in row-major order.
    pub fn positions_of(&self, value: Token) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &cell)| cell == value)
            .map(|(idx, _)| self.position(idx))
            .collect()
    }

    pub fn evaluate_pairs(&self) -> PairStatus {
        self.evaluate_pair_metrics().status
    }

    /// Single pass over the grid classifying every pair as matched
    /// (Manhattan distance 1) or unmatched.
    pub fn evaluate_pair_metrics(&self) -> PairMetrics {
        let mut metrics = PairMetrics {
            unmatched_mask: vec![false; self.cells.len()],
            ..PairMetrics::default()
        };

        // first occurrence of each id: dense ids index a table, the rest
        // go through a map
        let mut first_seen = vec![NOT_SEEN; self.cells.len()];
        let mut sparse_seen: HashMap<Token, usize> = HashMap::new();

        for (idx, &value) in self.cells.iter().enumerate() {
            let slot = match first_seen.get_mut(value as usize) {
                Some(slot) => slot,
                None => sparse_seen.entry(value).or_insert(NOT_SEEN),
            };

            let first = *slot;
            if first == NOT_SEEN {
                *slot = idx;
                continue;
            }

            let distance = self.position(first).manhattan(self.position(idx));
            if distance == 1 {
                metrics.status.matched += 1;
            } else {
                metrics.status.unmatched += 1;
                metrics.total_unmatched_distance += distance;
                metrics.max_unmatched_distance = metrics.max_unmatched_distance.max(distance);
                metrics.unmatched_mask[first] = true;
                metrics.unmatched_mask[idx] = true;
            }
        }

        metrics
    }

    pub fn is_goal_state(&self) -> bool {
        self.evaluate_pairs().is_goal(self.cells.len())
    }

    /// Order-sensitive 64-bit digest of the cell contents.
    ///
    /// Used for best-effort deduplication; collisions are possible but
    /// vanishingly rare.
    pub fn content_hash(&self) -> u64 {
        let mut hash = 0u64;
        for (idx, &value) in self.cells.iter().enumerate() {
            let mixed = splitmix64((value as u64).wrapping_mul(1_000_003).wrapping_add(idx as u64));
            hash ^= mixed
                .wrapping_add(0x9e37_79b9_7f4a_7c15)
                .wrapping_add(hash << 6)
                .wrapping_add(hash >> 2);
        }
        hash
    }

    #[inline]
    fn position(&self, idx: usize) -> Position {
        Position::new(idx % self.size, idx / self.size)
    }

    fn out_of_range(&self, x: usize, y: usize) -> PuzzleError {
        PuzzleError::OutOfRange {
            x,
            y,
            size: self.size,
        }
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (y, row) in self.cells.chunks(self.size).enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for (x, value) in row.iter().enumerate() {
                if x > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", value)?;
            }
        }
        Ok(())
    }
}

#[inline]
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}
