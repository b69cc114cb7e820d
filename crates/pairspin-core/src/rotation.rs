use serde::{Deserialize, Serialize};

/// A 90-degree clockwise rotation of the `size`x`size` window whose
/// top-left corner is `(x, y)`.
///
/// Serialized as `{"x": .., "y": .., "n": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rotation {
    pub x: usize,
    pub y: usize,
    #[serde(rename = "n")]
    pub size: usize,
}

impl Rotation {
    pub const fn new(x: usize, y: usize, size: usize) -> Self {
        Self { x, y, size }
    }

    /// Whether the window is at least 2x2 and lies fully inside a grid of
    /// side `grid_size`.
    pub fn is_valid(&self, grid_size: usize) -> bool {
        if self.size < 2 || self.size > grid_size {
            return false;
        }
        // x + size cannot overflow once size <= grid_size and x is checked first
        self.x <= grid_size - self.size && self.y <= grid_size - self.size
    }

    /// Number of cells moved by this rotation.
    pub fn footprint(&self) -> usize {
        self.size * self.size
    }

    /// Whether `(x, y)` lies inside the rotated window.
    pub fn covers(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.x + self.size && y >= self.y && y < self.y + self.size
    }
}

impl std::fmt::Display for Rotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.size)
    }
}
