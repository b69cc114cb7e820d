//! Candidate generation: legal rotations ranked by how many unmatched cells
//! they touch.

use crate::{Grid, PairMetrics, Rotation};

/// 2-D prefix sum over the unmatched mask for O(1) window counts.
pub struct MaskPrefix {
    size: usize,
    /// (size + 1) x (size + 1), row-major; sums[y][x] covers cells [0, x) x [0, y)
    sums: Vec<u32>,
}

impl MaskPrefix {
    pub fn new(size: usize, mask: &[bool]) -> Self {
        let stride = size + 1;
        let mut sums = vec![0u32; stride * stride];
        for y in 0..size {
            let mut row_total = 0u32;
            for x in 0..size {
                row_total += u32::from(mask[y * size + x]);
                sums[(y + 1) * stride + x + 1] = sums[y * stride + x + 1] + row_total;
            }
        }
        Self { size, sums }
    }

    /// Masked cells inside the rotation's window.
    pub fn count(&self, rotation: &Rotation) -> u32 {
        let stride = self.size + 1;
        let (x0, y0) = (rotation.x, rotation.y);
        let (x1, y1) = (rotation.x + rotation.size, rotation.y + rotation.size);
        self.sums[y1 * stride + x1] + self.sums[y0 * stride + x0]
            - self.sums[y0 * stride + x1]
            - self.sums[y1 * stride + x0]
    }
}

/// Every legal rotation for `grid`, in enumeration order: window sizes in
/// the order given, then rows, then columns.
pub fn enumerate_rotations(grid: &Grid, sizes: &[usize]) -> Vec<Rotation> {
    let n = grid.size();
    let mut out = Vec::new();
    for &k in sizes {
        if k < 2 || k > n {
            continue;
        }
        for y in 0..=(n - k) {
            for x in 0..=(n - k) {
                out.push(Rotation::new(x, y, k));
            }
        }
    }
    out
}

/// Rotations worth trying from `grid`.
///
/// The exact repeat of `previous` is dropped unless it is the only legal
/// move. When `metrics` reports unmatched pairs, rotations that touch no
/// unmatched cell are dropped and the rest are stably sorted by descending
/// impact.
pub fn generate_candidates(
    grid: &Grid,
    sizes: &[usize],
    previous: Option<Rotation>,
    metrics: Option<&PairMetrics>,
) -> Vec<Rotation> {
    let mut candidates = enumerate_rotations(grid, sizes);
    if let Some(prev) = previous {
        if candidates.len() > 1 {
            candidates.retain(|rot| *rot != prev);
        }
    }

    let metrics = match metrics {
        Some(m) if m.status.unmatched > 0 && m.has_mask() => m,
        _ => return candidates,
    };

    let prefix = MaskPrefix::new(grid.size(), &metrics.unmatched_mask);
    let mut ranked: Vec<(u32, Rotation)> = candidates
        .into_iter()
        .map(|rot| (prefix.count(&rot), rot))
        .filter(|(impact, _)| *impact > 0)
        .collect();
    // sort_by is stable: equal impacts keep enumeration order
    ranked.sort_by(|a, b| b.0.cmp(&a.0));
    ranked.into_iter().map(|(_, rot)| rot).collect()
}
