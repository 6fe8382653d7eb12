//! Search entry point over the numpy board layout.

use std::time::Duration;

use numpy::{AllowTypeChange, PyArrayLike1, PyArrayLike3};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::agent::MctsAgent;
use crate::core::Player;
use crate::games::ultimate::{LocalBoard, UltimateMove, UltimateState};
use crate::mcts::MCTSConfig;

use super::py_core::player_from_value;

fn cell(value: f64) -> PyResult<Option<Player>> {
    let v = value.round() as i64;
    if v == 0 {
        Ok(None)
    } else {
        player_from_value(v).map(Some)
    }
}

/// Build a state from the harness arrays.
fn state_from_arrays(
    blocks: &PyArrayLike3<'_, f64, AllowTypeChange>,
    global_cells: &PyArrayLike1<'_, f64, AllowTypeChange>,
    player_to_move: i64,
    previous_move: Option<(u8, u8, u8)>,
) -> PyResult<UltimateState> {
    let blocks = blocks.as_array();
    if blocks.shape() != [9, 3, 3] {
        return Err(PyValueError::new_err(format!(
            "blocks must have shape (9, 3, 3), got {:?}",
            blocks.shape()
        )));
    }
    let global_view = global_cells.as_array();
    if global_view.len() != 9 {
        return Err(PyValueError::new_err(format!(
            "global_cells must have 9 entries, got {}",
            global_view.len()
        )));
    }

    let mut boards = [LocalBoard::new(); 9];
    for (b, board) in boards.iter_mut().enumerate() {
        let mut cells = [None; 9];
        for (i, slot) in cells.iter_mut().enumerate() {
            *slot = cell(blocks[[b, i / 3, i % 3]])?;
        }
        *board = LocalBoard::from_cells(cells);
    }

    let mut global = [None; 9];
    for (i, slot) in global.iter_mut().enumerate() {
        *slot = cell(global_view[i])?;
    }

    let to_move = player_from_value(player_to_move)?;
    let previous = previous_move.map(|(board, x, y)| UltimateMove::new(board, x, y, to_move.opponent()));
    if let Some(mv) = previous {
        if mv.board >= 9 || mv.row >= 3 || mv.col >= 3 {
            return Err(PyValueError::new_err(format!("previous_move out of range: {mv}")));
        }
    }

    Ok(UltimateState::from_parts(boards, global, to_move, previous))
}

/// Choose a move for the position given in the harness layout.
///
/// - blocks: (9, 3, 3) array, 1 = X, -1 = O, 0 = empty
/// - global_cells: 9 entries, same encoding
/// - player_to_move: 1 or -1
/// - previous_move: (index_local_board, x, y) of the last move, if any
/// - remain_time: seconds available for this decision
///
/// Returns (index_local_board, x, y, value), or None when no move exists.
#[pyfunction]
#[pyo3(signature = (
    blocks,
    global_cells,
    player_to_move,
    previous_move = None,
    remain_time = None,
    iterations = 200,
    seed = None
))]
#[allow(clippy::too_many_arguments)]
pub fn select_move(
    py: Python<'_>,
    blocks: PyArrayLike3<'_, f64, AllowTypeChange>,
    global_cells: PyArrayLike1<'_, f64, AllowTypeChange>,
    player_to_move: i64,
    previous_move: Option<(u8, u8, u8)>,
    remain_time: Option<f64>,
    iterations: u32,
    seed: Option<u64>,
) -> PyResult<Option<(u8, u8, u8, i8)>> {
    let state = state_from_arrays(&blocks, &global_cells, player_to_move, previous_move)?;
    let remain = remain_time
        .filter(|t| t.is_finite() && *t >= 0.0)
        .map(Duration::from_secs_f64);
    let mut config = MCTSConfig::default().with_iterations(iterations);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let mv = py.allow_threads(move || MctsAgent::new(config).select_move(&state, remain))?;
    Ok(mv.map(|m| (m.board, m.row, m.col, m.mark.value())))
}
