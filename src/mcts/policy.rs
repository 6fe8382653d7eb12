//! MCTS policies for child scoring and rollouts.
//!
//! Policies are trait-based to allow customization:
//! - `SelectionPolicy`: How a child is scored when picking the best one (UCT)
//! - `SimulationPolicy`: How rollouts are played (uniform random)

use crate::core::GameRng;
use crate::error::Result;
use crate::rules::{GameResult, RulesEngine};

use super::node::OutcomeTally;

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for scoring a child during best-child selection.
pub trait SelectionPolicy: Send + Sync {
    /// Score a child with `visits` visits and `tally`, under a parent with
    /// `parent_visits` visits, using exploration constant `exploration`.
    fn score(&self, tally: &OutcomeTally, visits: u32, parent_visits: u32, exploration: f64) -> f64;
}

/// UCT selection policy.
///
/// Formula: (W - L) / n + c * sqrt(2 * ln(N) / n)
///
/// Draws add to `n` but not to the numerator, pulling the exploitation term
/// towards zero. An unvisited child scores `+inf`.
#[derive(Clone, Debug, Default)]
pub struct Uct;

impl SelectionPolicy for Uct {
    fn score(&self, tally: &OutcomeTally, visits: u32, parent_visits: u32, exploration: f64) -> f64 {
        if visits == 0 {
            return f64::INFINITY;
        }
        let n = visits as f64;
        let ln_parent = (parent_visits.max(1) as f64).ln();

        let exploitation = tally.net_wins() as f64 / n;
        let exploration = exploration * (2.0 * ln_parent / n).sqrt();
        exploitation + exploration
    }
}

/// Index of the highest-scoring child.
///
/// `children` yields `(visits, tally)` pairs. Only a strictly greater score
/// replaces the current best, so ties go to the earliest child. Returns
/// `None` when there are no children.
pub fn select_best<'a, P, I>(policy: &P, parent_visits: u32, children: I, exploration: f64) -> Option<usize>
where
    P: SelectionPolicy + ?Sized,
    I: IntoIterator<Item = (u32, &'a OutcomeTally)>,
{
    let mut best: Option<(usize, f64)> = None;
    for (i, (visits, tally)) in children.into_iter().enumerate() {
        let score = policy.score(tally, visits, parent_visits, exploration);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((i, score)),
        }
    }
    best.map(|(i, _)| i)
}

// =============================================================================
// Simulation Policy
// =============================================================================

/// What a rollout produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RolloutResult {
    /// Evaluation of the final position.
    pub result: GameResult,
    /// Moves played during the rollout.
    pub moves: u32,
}

/// Policy for running simulations (rollouts) from a leaf node.
pub trait SimulationPolicy<E: RulesEngine>: Send + Sync {
    /// Play out a private copy of `state` and evaluate the final position.
    ///
    /// `state` itself is never modified.
    fn simulate(&self, engine: &E, state: &E::State, rng: &mut GameRng) -> Result<RolloutResult>;
}

/// Random simulation policy.
///
/// Plays uniformly random legal moves until the game is over or no move
/// remains.
#[derive(Clone, Debug, Default)]
pub struct RandomSimulation;

impl<E: RulesEngine> SimulationPolicy<E> for RandomSimulation {
    fn simulate(&self, engine: &E, state: &E::State, rng: &mut GameRng) -> Result<RolloutResult> {
        let mut current = state.clone();
        let mut moves = 0;

        while !engine.is_terminal(&current) {
            let legal = engine.legal_moves(&current);
            let Some(mv) = rng.choose(&legal) else {
                break;
            };
            current = engine.apply_move(&current, mv)?;
            moves += 1;
        }

        Ok(RolloutResult {
            result: engine.game_result(&current),
            moves,
        })
    }
}
