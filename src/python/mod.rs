//! Python bindings for uttt-mcts.
//!
//! # Quick Start
//!
//! ```python
//! import numpy as np
//! import uttt_mcts
//!
//! blocks = np.zeros((9, 3, 3))
//! global_cells = np.zeros(9)
//!
//! # X (1) to move on the empty board
//! move = uttt_mcts.select_move(blocks, global_cells, 1, remain_time=10.0)
//!
//! # Or drive a whole game from Rust
//! game = uttt_mcts.UltimateGame()
//! while not game.is_game_over():
//!     m = game.select_move(iterations=200)
//!     game.apply_move(m.index_local_board, m.x, m.y)
//! ```

use pyo3::prelude::*;

mod py_core;
mod py_games;
mod py_search;

pub use py_core::*;
pub use py_games::*;
pub use py_search::*;

/// uttt_mcts: MCTS move selection for Ultimate Tic-Tac-Toe.
#[pymodule]
fn uttt_mcts(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyMove>()?;
    m.add_class::<PyUltimateGame>()?;
    m.add_function(wrap_pyfunction!(select_move, m)?)?;
    Ok(())
}
