use serde::{Deserialize, Serialize};

use crate::{Grid, PuzzleError, Result, Rotation, Token};

/// A puzzle instance as handed over by a loader: the board side and its
/// tokens in row-major order, each token appearing exactly twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub size: usize,
    pub entities: Vec<Token>,
}

impl Problem {
    pub fn new(size: usize, entities: Vec<Token>) -> Result<Self> {
        // Grid::new carries the shape checks
        Grid::new(size, entities.clone())?;
        Ok(Self { size, entities })
    }

    /// A fresh grid holding the initial layout.
    pub fn make_grid(&self) -> Result<Grid> {
        Grid::new(self.size, self.entities.clone())
    }

    pub fn pair_count(&self) -> usize {
        self.entities.len() / 2
    }

    /// Apply `moves` in order to a fresh grid.
    ///
    /// Fails at the first move that does not fit the board, reporting its
    /// index.
    pub fn replay(&self, moves: &[Rotation]) -> Result<Grid> {
        let mut grid = self.make_grid()?;
        for (index, rotation) in moves.iter().enumerate() {
            if !grid.is_valid_rotation(rotation) {
                return Err(PuzzleError::InvalidMove {
                    index,
                    rotation: *rotation,
                    size: self.size,
                });
            }
            grid.apply(rotation)?;
        }
        Ok(grid)
    }
}
