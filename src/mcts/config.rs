//! MCTS configuration parameters.

use serde::{Deserialize, Serialize};

use crate::core::Player;
use crate::error::{Error, Result};

/// Default number of search iterations per move.
pub const DEFAULT_ITERATIONS: u32 = 200;

/// Exploration constant used while descending the tree.
pub const DEFAULT_TREE_EXPLORATION: f64 = 0.1;

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MCTSConfig {
    /// Iterations of select / expand / rollout / backpropagate (default: 200).
    pub iterations: u32,

    /// UCT exploration constant used during tree-policy descent (default: 0.1).
    /// Kept low so the search deepens the lines that already score well.
    pub tree_exploration: f64,

    /// UCT exploration constant for the final choice at the root
    /// (default: sqrt(2)).
    pub final_exploration: f64,

    /// Random seed for rollouts.
    /// Same seed produces deterministic searches.
    pub seed: u64,

    /// Optional wall-clock budget in milliseconds.
    /// Checked once per iteration, never inside a rollout.
    pub time_limit_ms: Option<u64>,

    /// Player whose wins and losses are tallied.
    /// `None` uses the player to move at the root.
    pub perspective: Option<Player>,

    /// Maximum nodes to allocate in the tree.
    /// Reaching it ends the search at the next iteration boundary.
    pub max_nodes: usize,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            tree_exploration: DEFAULT_TREE_EXPLORATION,
            final_exploration: std::f64::consts::SQRT_2,
            seed: 42,
            time_limit_ms: None,
            perspective: None,
            max_nodes: 100_000,
        }
    }
}

impl MCTSConfig {
    /// Set the iteration count.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the descent exploration constant.
    pub fn with_tree_exploration(mut self, c: f64) -> Self {
        self.tree_exploration = c;
        self
    }

    /// Set the final root-selection exploration constant.
    pub fn with_final_exploration(mut self, c: f64) -> Self {
        self.final_exploration = c;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set a wall-clock budget.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Tally outcomes from a fixed player's point of view.
    pub fn with_perspective(mut self, player: Player) -> Self {
        self.perspective = Some(player);
        self
    }

    /// Set the node cap.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Reject settings the search cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(Error::InvalidConfig {
                message: "iterations must be at least 1".to_string(),
            });
        }
        for (name, c) in [
            ("tree_exploration", self.tree_exploration),
            ("final_exploration", self.final_exploration),
        ] {
            if !c.is_finite() || c < 0.0 {
                return Err(Error::InvalidConfig {
                    message: format!("{name} must be finite and non-negative, got {c}"),
                });
            }
        }
        if self.max_nodes < 2 {
            return Err(Error::InvalidConfig {
                message: "max_nodes must leave room for at least one child".to_string(),
            });
        }
        Ok(())
    }
}
