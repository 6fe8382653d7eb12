//! Error types for uttt-mcts.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move {mv}: {reason}")]
    InvalidMove { mv: String, reason: InvalidMoveReason },

    #[error("node {node} cannot be expanded (terminal or fully expanded)")]
    NotExpandable { node: u32 },

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Why a move was rejected by the rules.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidMoveReason {
    #[error("board index out of range")]
    BoardOutOfRange,

    #[error("cell coordinates out of range")]
    CellOutOfRange,

    #[error("it is not this mark's turn")]
    WrongTurn,

    #[error("cell is already occupied")]
    Occupied,

    #[error("board is not playable this turn")]
    BoardNotPlayable,
}

impl Error {
    /// Build an `InvalidMove` from anything displayable.
    pub fn invalid_move(mv: impl std::fmt::Display, reason: InvalidMoveReason) -> Self {
        Error::InvalidMove {
            mv: mv.to_string(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_move_message() {
        let err = Error::invalid_move("X@4(1,1)", InvalidMoveReason::Occupied);
        assert_eq!(err.to_string(), "invalid move X@4(1,1): cell is already occupied");
    }

    #[test]
    fn test_not_expandable_message() {
        let err = Error::NotExpandable { node: 7 };
        assert!(err.to_string().contains("node 7"));
    }
}
