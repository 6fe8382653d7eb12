//! Ultimate Tic-Tac-Toe position and move types.

use serde::{Deserialize, Serialize};

use super::board::{line_winner, LocalBoard};
use crate::core::Player;
use crate::error::{Error, InvalidMoveReason, Result};

/// A move: `mark` placed at (`row`, `col`) of local board `board`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UltimateMove {
    /// Local board index, 0..9 row-major.
    pub board: u8,
    /// Row within the local board, 0..3.
    pub row: u8,
    /// Column within the local board, 0..3.
    pub col: u8,
    /// The mark being placed.
    pub mark: Player,
}

impl UltimateMove {
    /// Create a new move.
    #[must_use]
    pub const fn new(board: u8, row: u8, col: u8, mark: Player) -> Self {
        Self {
            board,
            row,
            col,
            mark,
        }
    }

    /// The board the opponent is sent to after this move.
    #[inline]
    #[must_use]
    pub const fn next_board(&self) -> usize {
        self.row as usize * 3 + self.col as usize
    }
}

impl std::fmt::Display for UltimateMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}({},{})", self.mark, self.board, self.row, self.col)
    }
}

/// A full Ultimate Tic-Tac-Toe position.
///
/// `Copy`: every transition produces a fresh value, so a state held by a
/// search node can never be changed by a later move or rollout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UltimateState {
    blocks: [LocalBoard; 9],
    global: [Option<Player>; 9],
    to_move: Player,
    previous_move: Option<UltimateMove>,
}

impl Default for UltimateState {
    fn default() -> Self {
        Self::new()
    }
}

impl UltimateState {
    /// The empty starting position, X to move.
    #[must_use]
    pub fn new() -> Self {
        Self {
            blocks: [LocalBoard::new(); 9],
            global: [None; 9],
            to_move: Player::X,
            previous_move: None,
        }
    }

    /// Assemble a position from its parts.
    ///
    /// The global board is taken as given; it is not recomputed from the
    /// local boards.
    #[must_use]
    pub fn from_parts(
        blocks: [LocalBoard; 9],
        global: [Option<Player>; 9],
        to_move: Player,
        previous_move: Option<UltimateMove>,
    ) -> Self {
        Self {
            blocks,
            global,
            to_move,
            previous_move,
        }
    }

    /// The nine local boards.
    #[must_use]
    pub fn blocks(&self) -> &[LocalBoard; 9] {
        &self.blocks
    }

    /// The global summary board.
    #[must_use]
    pub fn global(&self) -> &[Option<Player>; 9] {
        &self.global
    }

    /// The player to move.
    #[must_use]
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// The most recent move, `None` at the start.
    #[must_use]
    pub fn previous_move(&self) -> Option<UltimateMove> {
        self.previous_move
    }

    /// The board the mover is forced into, or `None` for a free move.
    #[must_use]
    pub fn target_board(&self) -> Option<usize> {
        let target = self.previous_move?.next_board();
        (!self.blocks[target].is_full()).then_some(target)
    }

    /// Legal moves, ordered by board then row-major cell.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<UltimateMove> {
        let mark = self.to_move;
        let boards = match self.target_board() {
            Some(target) => target..target + 1,
            None => 0..9,
        };

        boards
            .flat_map(|b| {
                self.blocks[b]
                    .empty_cells()
                    .map(move |(row, col)| UltimateMove::new(b as u8, row, col, mark))
            })
            .collect()
    }

    /// The player owning a line on the global board.
    #[must_use]
    pub fn global_winner(&self) -> Option<Player> {
        line_winner(&self.global)
    }

    /// Game over: a global line, or no empty cell anywhere.
    ///
    /// While any cell is empty some move is legal: either the target board
    /// has room or the mover gets a free move.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.global_winner().is_some() || self.blocks.iter().all(LocalBoard::is_full)
    }

    /// Check `mv` against this position without changing it.
    pub fn check_move(&self, mv: &UltimateMove) -> Result<()> {
        let reject = |reason| Err(Error::invalid_move(mv, reason));

        if mv.board >= 9 {
            return reject(InvalidMoveReason::BoardOutOfRange);
        }
        if mv.row >= 3 || mv.col >= 3 {
            return reject(InvalidMoveReason::CellOutOfRange);
        }
        if mv.mark != self.to_move {
            return reject(InvalidMoveReason::WrongTurn);
        }
        if self.blocks[mv.board as usize].get(mv.row, mv.col).is_some() {
            return reject(InvalidMoveReason::Occupied);
        }
        if let Some(target) = self.target_board() {
            if target != mv.board as usize {
                return reject(InvalidMoveReason::BoardNotPlayable);
            }
        }
        Ok(())
    }

    /// Write `mv` into a copy of this state. Caller has validated the move.
    pub(crate) fn with_move_unchecked(&self, mv: &UltimateMove) -> Self {
        let mut next = *self;
        let idx = mv.board as usize;

        next.blocks[idx].set(mv.row, mv.col, mv.mark);
        next.to_move = self.to_move.opponent();
        next.previous_move = Some(*mv);

        // A decided local board keeps its first winner.
        if next.global[idx].is_none() {
            if let Some(winner) = next.blocks[idx].winner() {
                next.global[idx] = Some(winner);
            }
        }

        next
    }
}

impl std::fmt::Display for UltimateState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = |cell: Option<Player>| cell.map_or('.', Player::symbol);

        for big_row in 0..3 {
            if big_row > 0 {
                writeln!(f, "------+-------+------")?;
            }
            for row in 0..3u8 {
                let line: Vec<String> = (0..3)
                    .map(|big_col| {
                        let block = &self.blocks[big_row * 3 + big_col];
                        (0..3u8)
                            .map(|col| symbol(block.get(row, col)).to_string())
                            .collect::<Vec<_>>()
                            .join(" ")
                    })
                    .collect();
                writeln!(f, "{}", line.join(" | "))?;
            }
        }

        let global: String = self.global.iter().map(|c| symbol(*c)).collect();
        write!(f, "global: {}  to move: {}", global, self.to_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_position() {
        let state = UltimateState::new();
        assert_eq!(state.to_move(), Player::X);
        assert_eq!(state.previous_move(), None);
        assert_eq!(state.target_board(), None);
        assert_eq!(state.legal_moves().len(), 81);
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_move_sends_opponent_to_board() {
        let state = UltimateState::new();
        let mv = UltimateMove::new(4, 0, 2, Player::X);
        state.check_move(&mv).unwrap();

        let next = state.with_move_unchecked(&mv);
        assert_eq!(next.to_move(), Player::O);
        assert_eq!(next.previous_move(), Some(mv));
        assert_eq!(next.target_board(), Some(2));

        let moves = next.legal_moves();
        assert_eq!(moves.len(), 9);
        assert!(moves.iter().all(|m| m.board == 2 && m.mark == Player::O));
    }

    #[test]
    fn test_full_target_board_gives_free_move() {
        use Player::{O, X};
        let mut blocks = [LocalBoard::new(); 9];
        blocks[0] = LocalBoard::from_cells([
            Some(X), Some(O), Some(X),
            Some(X), Some(O), Some(O),
            Some(O), Some(X), Some(X),
        ]);
        let previous = UltimateMove::new(3, 0, 0, O);
        let state = UltimateState::from_parts(blocks, [None; 9], X, Some(previous));

        assert_eq!(state.target_board(), None);
        let moves = state.legal_moves();
        assert_eq!(moves.len(), 72);
        assert!(moves.iter().all(|m| m.board != 0));
    }

    #[test]
    fn test_check_move_rejections() {
        let state = UltimateState::new()
            .with_move_unchecked(&UltimateMove::new(4, 1, 1, Player::X));

        let cases = [
            (UltimateMove::new(9, 0, 0, Player::O), InvalidMoveReason::BoardOutOfRange),
            (UltimateMove::new(4, 3, 0, Player::O), InvalidMoveReason::CellOutOfRange),
            (UltimateMove::new(4, 0, 0, Player::X), InvalidMoveReason::WrongTurn),
            (UltimateMove::new(4, 1, 1, Player::O), InvalidMoveReason::Occupied),
            (UltimateMove::new(0, 0, 0, Player::O), InvalidMoveReason::BoardNotPlayable),
        ];

        for (mv, reason) in cases {
            match state.check_move(&mv) {
                Err(Error::InvalidMove { reason: r, .. }) => assert_eq!(r, reason, "{mv}"),
                other => panic!("expected InvalidMove for {mv}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_global_line_ends_game() {
        let global = [
            Some(Player::O), Some(Player::O), Some(Player::O),
            None, None, None,
            None, None, None,
        ];
        let state = UltimateState::from_parts([LocalBoard::new(); 9], global, Player::X, None);
        assert_eq!(state.global_winner(), Some(Player::O));
        assert!(state.is_game_over());
    }

    #[test]
    fn test_display_renders_grid() {
        let state = UltimateState::new()
            .with_move_unchecked(&UltimateMove::new(0, 0, 0, Player::X));
        let text = state.to_string();
        assert!(text.starts_with("X . ."));
        assert!(text.contains("to move: O"));
    }
}
