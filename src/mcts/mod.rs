//! Monte Carlo Tree Search for uttt-mcts.
//!
//! ## Overview
//!
//! Plain UCT search with random rollouts:
//!
//! - **Arena tree**: Nodes stored in a `Vec`, linked by `NodeId` indices
//! - **Lazy expansion**: One pending move becomes a child per iteration
//! - **Random rollouts**: Uniform playouts on a private copy of the state
//! - **Two exploration constants**: A low one for descent, `sqrt(2)` for
//!   the final root choice
//! - **Deterministic**: A fixed seed reproduces the same search
//!
//! ## Usage
//!
//! ```rust
//! use uttt_mcts::games::ultimate::{UltimateRules, UltimateState};
//! use uttt_mcts::mcts::{MCTSConfig, MCTSSearch};
//!
//! let config = MCTSConfig::default().with_iterations(200);
//! let mut search = MCTSSearch::new(UltimateRules, UltimateState::new(), config);
//!
//! if let Some(mv) = search.search().unwrap() {
//!     println!("Best move: {}", mv);
//! }
//!
//! for (mv, visits, tally) in search.root_children() {
//!     println!("{}: {} visits, {} net wins", mv, visits, tally.net_wins());
//! }
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use config::MCTSConfig;
pub use node::{MCTSNode, NodeId, Outcome, OutcomeTally};
pub use policy::{select_best, RandomSimulation, RolloutResult, SelectionPolicy, SimulationPolicy, Uct};
pub use search::{select_move, MCTSSearch};
pub use stats::SearchStats;
pub use tree::{MCTSTree, TreeStats};
