//! Core type bindings for Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::Player;
use crate::error::Error;
use crate::games::ultimate::UltimateMove;

impl From<Error> for PyErr {
    fn from(err: Error) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// Decode the signed mark encoding (1 = X, -1 = O).
pub(crate) fn player_from_value(value: i64) -> PyResult<Player> {
    Player::from_value(value)
        .ok_or_else(|| PyValueError::new_err(format!("mark must be 1 or -1, got {value}")))
}

/// Python wrapper for UltimateMove.
///
/// Mirrors the harness layout: `index_local_board`, `x`, `y`, `value`.
#[pyclass(name = "Move")]
#[derive(Clone, Debug)]
pub struct PyMove(pub UltimateMove);

#[pymethods]
impl PyMove {
    #[new]
    fn new(index_local_board: u8, x: u8, y: u8, value: i64) -> PyResult<Self> {
        let mark = player_from_value(value)?;
        Ok(Self(UltimateMove::new(index_local_board, x, y, mark)))
    }

    #[getter]
    fn index_local_board(&self) -> u8 {
        self.0.board
    }

    #[getter]
    fn x(&self) -> u8 {
        self.0.row
    }

    #[getter]
    fn y(&self) -> u8 {
        self.0.col
    }

    #[getter]
    fn value(&self) -> i8 {
        self.0.mark.value()
    }

    /// (index_local_board, x, y, value)
    fn as_tuple(&self) -> (u8, u8, u8, i8) {
        (self.0.board, self.0.row, self.0.col, self.0.mark.value())
    }

    fn __repr__(&self) -> String {
        format!(
            "Move(index_local_board={}, x={}, y={}, value={})",
            self.0.board,
            self.0.row,
            self.0.col,
            self.0.mark.value()
        )
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
