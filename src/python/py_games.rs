//! Game bindings for Python.

use pyo3::prelude::*;

use crate::agent::MctsAgent;
use crate::games::ultimate::{apply_move, UltimateMove, UltimateState};
use crate::mcts::MCTSConfig;

use super::py_core::PyMove;

/// Python wrapper for an Ultimate Tic-Tac-Toe game in progress.
#[pyclass(name = "UltimateGame")]
pub struct PyUltimateGame {
    state: UltimateState,
}

#[pymethods]
impl PyUltimateGame {
    /// Start from the empty board, X to move.
    #[new]
    fn new() -> Self {
        Self {
            state: UltimateState::new(),
        }
    }

    /// Legal moves for the player to move.
    fn legal_moves(&self) -> Vec<PyMove> {
        self.state.legal_moves().into_iter().map(PyMove).collect()
    }

    /// Play the mover's mark at (`x`, `y`) of local board `index_local_board`.
    ///
    /// Raises ValueError for an illegal move; the game is left unchanged.
    fn apply_move(&mut self, index_local_board: u8, x: u8, y: u8) -> PyResult<()> {
        let mv = UltimateMove::new(index_local_board, x, y, self.state.to_move());
        self.state = apply_move(&self.state, &mv)?;
        Ok(())
    }

    /// Whether the game has ended.
    fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Winner's mark (1 or -1), or None.
    fn winner(&self) -> Option<i8> {
        self.state.global_winner().map(|p| p.value())
    }

    /// Mark of the player to move.
    #[getter]
    fn player_to_move(&self) -> i8 {
        self.state.to_move().value()
    }

    /// Global board as nine marks (0 = undecided).
    #[getter]
    fn global_cells(&self) -> Vec<i8> {
        self.state.global().iter().map(|c| c.map_or(0, |p| p.value())).collect()
    }

    /// Search for a move; None if the game is over.
    #[pyo3(signature = (iterations = 200, seed = None))]
    fn select_move(
        &self,
        py: Python<'_>,
        iterations: u32,
        seed: Option<u64>,
    ) -> PyResult<Option<PyMove>> {
        let mut config = MCTSConfig::default().with_iterations(iterations);
        if let Some(seed) = seed {
            config = config.with_seed(seed);
        }
        let state = self.state;
        let mv = py.allow_threads(move || MctsAgent::new(config).select_move(&state, None))?;
        Ok(mv.map(PyMove))
    }

    fn __str__(&self) -> String {
        self.state.to_string()
    }

    fn __repr__(&self) -> String {
        let status = if self.state.is_game_over() {
            "over"
        } else {
            "ongoing"
        };
        format!(
            "UltimateGame(to_move={}, status={})",
            self.state.to_move(),
            status
        )
    }
}
