//! Player marks.
//!
//! Ultimate Tic-Tac-Toe is strictly two-player, so a player is identified by
//! the mark it writes on the board. X always moves first.

use serde::{Deserialize, Serialize};

/// A player, identified by its mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Both players in turn order.
    pub const ALL: [Player; 2] = [Player::X, Player::O];

    /// The player who moves next after this one.
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Signed encoding used by numeric board layouts: X = 1, O = -1.
    #[inline]
    #[must_use]
    pub const fn value(self) -> i8 {
        match self {
            Player::X => 1,
            Player::O => -1,
        }
    }

    /// Decode the signed encoding. Any other value is `None`.
    #[must_use]
    pub const fn from_value(value: i64) -> Option<Self> {
        match value {
            1 => Some(Player::X),
            -1 => Some(Player::O),
            _ => None,
        }
    }

    /// The board character for this mark.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
