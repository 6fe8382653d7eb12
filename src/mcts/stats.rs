//! MCTS search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during MCTS search.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Total iterations performed.
    pub iterations: u32,

    /// Nodes expanded (added to tree).
    pub nodes_expanded: u32,

    /// Rollouts performed.
    pub rollouts: u32,

    /// Moves played across all rollouts.
    pub rollout_moves: u64,

    /// Maximum depth reached during search.
    pub max_depth: u16,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Calculate iterations per second.
    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.iterations as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Average moves per rollout.
    #[must_use]
    pub fn avg_rollout_length(&self) -> f64 {
        if self.rollouts == 0 {
            0.0
        } else {
            self.rollout_moves as f64 / self.rollouts as f64
        }
    }
}
