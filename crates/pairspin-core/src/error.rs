use thiserror::Error;

use crate::Rotation;

pub type Result<T> = std::result::Result<T, PuzzleError>;

/// Failures surfaced by grid construction, grid access and replay.
///
/// Running out of time, nodes or depth is not an error: the solver returns
/// its best result instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("grid size must be positive")]
    ZeroSize,

    #[error("a {size}x{size} grid needs {expected} cells, got {actual}")]
    CellCountMismatch {
        size: usize,
        expected: usize,
        actual: usize,
    },

    #[error("position ({x}, {y}) is outside a {size}x{size} grid")]
    OutOfRange { x: usize, y: usize, size: usize },

    #[error("rotation {rotation} does not fit a {size}x{size} grid")]
    InvalidRotation { rotation: Rotation, size: usize },

    #[error("move {index} ({rotation}) does not fit a {size}x{size} grid")]
    InvalidMove {
        index: usize,
        rotation: Rotation,
        size: usize,
    },

    #[error("invalid search configuration: {message}")]
    InvalidConfig { message: String },
}

impl PuzzleError {
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
