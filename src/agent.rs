//! Move-selection entry points for an Ultimate Tic-Tac-Toe player.
//!
//! Every call builds a fresh tree from the given position and drops it once
//! the move is chosen; nothing carries over between turns.

use std::time::Duration;

use tracing::debug;

use crate::error::Result;
use crate::games::ultimate::{UltimateMove, UltimateRules, UltimateState};
use crate::mcts::{self, MCTSConfig};

/// Pick a move for the player to move in `state` with the default search.
///
/// `remain_time` caps the wall-clock time spent; the search still runs at
/// least one iteration. Returns `None` when the position has no move.
pub fn select_move(state: &UltimateState, remain_time: Option<Duration>) -> Result<Option<UltimateMove>> {
    MctsAgent::new(MCTSConfig::default()).select_move(state, remain_time)
}

/// A player that searches every turn with the same settings.
///
/// Each turn is seeded from the base seed and the turn counter, so a game
/// replays exactly while successive turns still see different rollouts.
#[derive(Clone, Debug)]
pub struct MctsAgent {
    config: MCTSConfig,
    turns: u64,
}

impl MctsAgent {
    pub fn new(config: MCTSConfig) -> Self {
        Self { config, turns: 0 }
    }

    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    /// Choose a move for `state`.
    pub fn select_move(
        &mut self,
        state: &UltimateState,
        remain_time: Option<Duration>,
    ) -> Result<Option<UltimateMove>> {
        let mut config = self
            .config
            .clone()
            .with_seed(self.config.seed.wrapping_add(self.turns));
        if let Some(remaining) = remain_time {
            let ms = u64::try_from(remaining.as_millis()).unwrap_or(u64::MAX);
            let ms = config.time_limit_ms.map_or(ms, |limit| limit.min(ms));
            config = config.with_time_limit_ms(ms);
        }
        self.turns += 1;

        let mv = mcts::select_move(UltimateRules, *state, config)?;
        debug!(turn = self.turns, chosen = ?mv, "agent move");
        Ok(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Player;

    #[test]
    fn test_select_move_from_start() {
        let state = UltimateState::new();
        let mv = select_move(&state, None).unwrap().unwrap();

        assert_eq!(mv.mark, Player::X);
        assert!(state.check_move(&mv).is_ok());
    }

    #[test]
    fn test_agent_replays_with_same_seed() {
        let state = UltimateState::new();
        let config = MCTSConfig::default().with_iterations(50).with_seed(9);

        let mut a = MctsAgent::new(config.clone());
        let mut b = MctsAgent::new(config);

        for _ in 0..3 {
            assert_eq!(
                a.select_move(&state, None).unwrap(),
                b.select_move(&state, None).unwrap()
            );
        }
    }

    #[test]
    fn test_remaining_time_caps_budget() {
        let state = UltimateState::new();
        let mut agent = MctsAgent::new(MCTSConfig::default().with_iterations(1_000_000));

        let mv = agent.select_move(&state, Some(Duration::from_millis(0))).unwrap();
        assert!(mv.is_some());
    }
}
