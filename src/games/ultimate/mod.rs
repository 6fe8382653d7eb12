//! Ultimate Tic-Tac-Toe.
//!
//! Nine local 3×3 boards arranged in a 3×3 grid. The cell a player picks
//! inside a local board sends the opponent to the local board at the same
//! position; if that board is full the opponent may play anywhere. Winning
//! a local board claims the matching cell of the global board, and a line
//! on the global board wins the game.

mod board;
mod rules;
mod state;

pub use board::{line_winner, LocalBoard, LINES};
pub use rules::{apply_move, UltimateRules};
pub use state::{UltimateMove, UltimateState};
