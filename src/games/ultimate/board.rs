//! A single 3×3 local board and line detection.

use serde::{Deserialize, Serialize};

use crate::core::Player;

/// Winning lines on a 3×3 grid, as row-major cell indices.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Return the owner of any completed line on a 3×3 grid.
///
/// Used both for local boards and for the global summary board.
#[must_use]
pub fn line_winner(cells: &[Option<Player>; 9]) -> Option<Player> {
    LINES.iter().find_map(|&[a, b, c]| match cells[a] {
        Some(p) if cells[b] == Some(p) && cells[c] == Some(p) => Some(p),
        _ => None,
    })
}

/// One of the nine 3×3 sub-boards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalBoard {
    cells: [Option<Player>; 9],
}

impl LocalBoard {
    /// An empty board.
    #[must_use]
    pub const fn new() -> Self {
        Self { cells: [None; 9] }
    }

    /// Build a board from row-major cells.
    #[must_use]
    pub const fn from_cells(cells: [Option<Player>; 9]) -> Self {
        Self { cells }
    }

    /// Row-major cells.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[Option<Player>; 9] {
        &self.cells
    }

    /// The mark at (`row`, `col`). Panics if either is out of range.
    #[inline]
    #[must_use]
    pub fn get(&self, row: u8, col: u8) -> Option<Player> {
        self.cells[row as usize * 3 + col as usize]
    }

    pub(crate) fn set(&mut self, row: u8, col: u8, mark: Player) {
        self.cells[row as usize * 3 + col as usize] = Some(mark);
    }

    /// No empty cell remains.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Empty cells as (row, col), row-major.
    pub fn empty_cells(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(i, _)| ((i / 3) as u8, (i % 3) as u8))
    }

    /// The owner of a completed line, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        line_winner(&self.cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: Option<Player> = Some(Player::X);
    const O: Option<Player> = Some(Player::O);
    const E: Option<Player> = None;

    #[test]
    fn test_empty_board() {
        let board = LocalBoard::new();
        assert!(!board.is_full());
        assert_eq!(board.winner(), None);
        assert_eq!(board.empty_cells().count(), 9);
    }

    #[test]
    fn test_row_column_diagonal_wins() {
        let row = LocalBoard::from_cells([E, E, E, O, O, O, X, X, E]);
        assert_eq!(row.winner(), Some(Player::O));

        let col = LocalBoard::from_cells([E, X, O, E, X, O, E, X, E]);
        assert_eq!(col.winner(), Some(Player::X));

        let anti = LocalBoard::from_cells([X, X, O, E, O, E, O, E, X]);
        assert_eq!(anti.winner(), Some(Player::O));
    }

    #[test]
    fn test_full_board_without_line() {
        let board = LocalBoard::from_cells([X, O, X, X, O, O, O, X, X]);
        assert!(board.is_full());
        assert_eq!(board.winner(), None);
        assert_eq!(board.empty_cells().count(), 0);
    }

    #[test]
    fn test_set_and_get() {
        let mut board = LocalBoard::new();
        board.set(2, 1, Player::X);
        assert_eq!(board.get(2, 1), Some(Player::X));
        assert_eq!(board.cells()[7], Some(Player::X));

        let empty: Vec<_> = board.empty_cells().collect();
        assert_eq!(empty.len(), 8);
        assert!(!empty.contains(&(2, 1)));
    }
}
