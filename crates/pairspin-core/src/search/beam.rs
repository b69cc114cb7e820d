//! One outer iteration: multi-depth beam expansion from a root.

use std::collections::HashSet;

use super::node::retain_top;
use super::{Run, SearchNode};
use crate::{generate_candidates, Clock, RandomSource, Result, SearchLimits};

/// Extra children a parent may keep per unmatched pair it still has.
const CHILD_BONUS_PER_UNMATCHED: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IterationStatus {
    /// A child with every pair matched was produced.
    Solved,
    /// Depth, node or time cap reached.
    LimitReached,
    /// No layer could be extended.
    Exhausted,
}

#[derive(Debug)]
pub(crate) struct IterationOutcome {
    pub status: IterationStatus,
    pub best_unsolved: Option<SearchNode>,
    pub explored: usize,
    pub depth_reached: usize,
}

/// Children a parent keeps: the base cap plus a bonus for every pair it
/// still has to fix, the bonus bounded by half the beam width.
fn child_cap(limits: &SearchLimits, parent: &SearchNode) -> usize {
    let bonus = (parent.metrics.status.unmatched * CHILD_BONUS_PER_UNMATCHED).min(limits.beam_width / 2);
    limits.max_children_per_node + bonus
}

impl<C: Clock, R: RandomSource> Run<'_, C, R> {
    pub(super) fn expand(&mut self, root: &SearchNode, limits: &SearchLimits) -> Result<IterationOutcome> {
        let mut seen: HashSet<u64> = HashSet::new();
        if self.config.dedup {
            seen.insert(root.hash);
        }

        let mut explored = 0usize;
        let mut best_unsolved: Option<SearchNode> = None;
        let mut layer = vec![root.clone()];

        macro_rules! finish {
            ($status:expr, $depth:expr) => {
                return Ok(IterationOutcome {
                    status: $status,
                    best_unsolved,
                    explored,
                    depth_reached: $depth,
                })
            };
        }

        for depth in 0..limits.max_depth {
            if self.budget.exhausted() {
                finish!(IterationStatus::LimitReached, depth);
            }

            let layer_depth = depth + 1;
            let mut next = Vec::new();
            let mut capped = false;

            for parent in &layer {
                if self.budget.exhausted() || explored >= limits.max_nodes {
                    capped = true;
                    break;
                }

                let candidates = generate_candidates(
                    &parent.grid,
                    &self.config.rotation_sizes,
                    parent.last_move(),
                    Some(&parent.metrics),
                );

                let mut children = Vec::with_capacity(candidates.len());
                for rotation in candidates {
                    if self.budget.exhausted() || explored >= limits.max_nodes {
                        capped = true;
                        break;
                    }

                    let child = parent.child(rotation, layer_depth, &self.config.weights, &mut *self.rng)?;
                    // every insert is counted against the node cap, so the
                    // set never outgrows it
                    if self.config.dedup && !seen.insert(child.hash) {
                        continue;
                    }

                    explored += 1;
                    self.explored += 1;
                    self.tracker.offer(&child);

                    if child.is_solved() {
                        finish!(IterationStatus::Solved, layer_depth);
                    }
                    if best_unsolved.as_ref().map_or(true, |best| child.outranks(best)) {
                        best_unsolved = Some(child.clone());
                    }
                    children.push(child);
                }

                retain_top(&mut children, child_cap(limits, parent));
                next.append(&mut children);

                if capped {
                    break;
                }
            }

            if next.is_empty() {
                let status = if capped {
                    IterationStatus::LimitReached
                } else {
                    IterationStatus::Exhausted
                };
                finish!(status, depth);
            }

            retain_top(&mut next, limits.beam_width);
            layer = next;

            if capped {
                finish!(IterationStatus::LimitReached, layer_depth);
            }
        }

        finish!(IterationStatus::LimitReached, limits.max_depth)
    }
}
