//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define their rules:
//! - What moves are legal
//! - How a move produces the next state
//! - When the game is over and who won

use std::fmt::{Debug, Display};

use crate::core::Player;
use crate::error::Result;

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(Player),
    /// No winner.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: Player) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    /// The winning player, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameResult::Winner(p) => Some(*p),
            GameResult::Draw => None,
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_moves`: Return an empty vec if the mover can't act
/// - `apply_move`: Must be pure; the input state is never modified
/// - `game_result`: Only meaningful once `is_terminal` holds
pub trait RulesEngine {
    /// A full game position.
    type State: Clone + Debug;

    /// A single move. `Display` is used in errors and logs.
    type Move: Clone + Debug + Display + PartialEq;

    /// The player whose turn it is.
    fn to_move(&self, state: &Self::State) -> Player;

    /// All legal moves from `state`, empty if none.
    fn legal_moves(&self, state: &Self::State) -> Vec<Self::Move>;

    /// Produce the state after `mv`, or `Error::InvalidMove`.
    fn apply_move(&self, state: &Self::State, mv: &Self::Move) -> Result<Self::State>;

    /// Whether the game has ended.
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Evaluate a finished (or exhausted) position.
    fn game_result(&self, state: &Self::State) -> GameResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(Player::O);
        assert!(!result.is_winner(Player::X));
        assert!(result.is_winner(Player::O));
        assert_eq!(result.winner(), Some(Player::O));

        let draw = GameResult::Draw;
        assert!(!draw.is_winner(Player::X));
        assert!(!draw.is_winner(Player::O));
        assert_eq!(draw.winner(), None);
    }
}
