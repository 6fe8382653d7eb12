//! `RulesEngine` implementation and the move-application helper.

use tracing::trace;

use super::state::{UltimateMove, UltimateState};
use crate::core::Player;
use crate::error::Result;
use crate::rules::{GameResult, RulesEngine};

/// Apply `mv` to `state`, returning the new position.
///
/// Validation happens before anything is written, and the input is never
/// modified: on error the caller still holds the untouched state. The
/// targeted local board's global cell is assigned only the first time that
/// board produces a line.
pub fn apply_move(state: &UltimateState, mv: &UltimateMove) -> Result<UltimateState> {
    state.check_move(mv)?;
    let next = state.with_move_unchecked(mv);
    if next.global() != state.global() {
        trace!(board = mv.board, winner = %mv.mark, "local board decided");
    }
    Ok(next)
}

/// Ultimate Tic-Tac-Toe rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct UltimateRules;

impl UltimateRules {
    pub fn new() -> Self {
        Self
    }
}

impl RulesEngine for UltimateRules {
    type State = UltimateState;
    type Move = UltimateMove;

    fn to_move(&self, state: &UltimateState) -> Player {
        state.to_move()
    }

    fn legal_moves(&self, state: &UltimateState) -> Vec<UltimateMove> {
        state.legal_moves()
    }

    fn apply_move(&self, state: &UltimateState, mv: &UltimateMove) -> Result<UltimateState> {
        apply_move(state, mv)
    }

    fn is_terminal(&self, state: &UltimateState) -> bool {
        state.is_game_over()
    }

    fn game_result(&self, state: &UltimateState) -> GameResult {
        match state.global_winner() {
            Some(winner) => GameResult::Winner(winner),
            None => GameResult::Draw,
        }
    }
}
