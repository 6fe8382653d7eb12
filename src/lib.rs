//! # uttt-mcts
//!
//! Monte Carlo Tree Search move selection for Ultimate Tic-Tac-Toe.
//!
//! ## Design Principles
//!
//! 1. **Rules Behind a Trait**: The search only talks to `RulesEngine`.
//!    Ultimate Tic-Tac-Toe is one implementation of it.
//!
//! 2. **Pure Transitions**: Applying a move returns a new state. Nodes keep
//!    their positions untouched and rollouts play on private copies.
//!
//! 3. **Deterministic**: All randomness comes from a seeded `GameRng`.
//!
//! ## Modules
//!
//! - `core`: Player marks and RNG
//! - `rules`: RulesEngine trait and game results
//! - `games`: Ultimate Tic-Tac-Toe rules
//! - `mcts`: Monte Carlo Tree Search
//! - `agent`: Per-turn move selection
//! - `python`: PyO3 bindings (feature `python`)

pub mod agent;
pub mod core;
pub mod error;
pub mod games;
pub mod mcts;
pub mod rules;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{GameRng, GameRngState, Player};

pub use crate::error::{Error, InvalidMoveReason, Result};

pub use crate::rules::{GameResult, RulesEngine};

pub use crate::games::ultimate::{apply_move, LocalBoard, UltimateMove, UltimateRules, UltimateState};

pub use crate::mcts::{
    MCTSConfig, MCTSSearch, MCTSTree, MCTSNode, NodeId, Outcome, OutcomeTally,
    SearchStats, TreeStats,
    SelectionPolicy, SimulationPolicy, RandomSimulation, Uct,
};

pub use crate::agent::{select_move, MctsAgent};
