//! Core MCTS search algorithm.
//!
//! Each iteration runs the four classic phases over an arena tree rooted at
//! the position being decided:
//!
//! 1. **Selection**: descend through fully expanded nodes by UCT score
//! 2. **Expansion**: turn one pending move of the reached node into a child
//! 3. **Rollout**: play the new child out at random on a private copy
//! 4. **Backpropagation**: record the outcome on every node back to the root
//!
//! Descent and the final root choice use different exploration constants
//! (`MCTSConfig::tree_exploration` and `MCTSConfig::final_exploration`).

use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use crate::core::{GameRng, Player};
use crate::error::{Error, Result};
use crate::rules::RulesEngine;

use super::config::MCTSConfig;
use super::node::{MCTSNode, NodeId, Outcome, OutcomeTally};
use super::policy::{select_best, RandomSimulation, SelectionPolicy, SimulationPolicy, Uct};
use super::stats::SearchStats;
use super::tree::MCTSTree;

/// Main MCTS search context.
///
/// Generic over the rules engine type. Owns the tree for one decision: build
/// it from the current position, run the search, read off the move, drop it.
pub struct MCTSSearch<E: RulesEngine> {
    /// The game rules engine.
    engine: E,

    /// Search configuration.
    config: MCTSConfig,

    /// The search tree.
    tree: MCTSTree<E::State, E::Move>,

    /// RNG for rollouts.
    rng: GameRng,

    /// Player whose wins and losses are tallied.
    perspective: Player,

    /// Selection policy.
    selection: Box<dyn SelectionPolicy>,

    /// Simulation policy.
    simulation: Box<dyn SimulationPolicy<E>>,

    /// Search statistics.
    stats: SearchStats,
}

impl<E: RulesEngine> MCTSSearch<E> {
    /// Create a search rooted at `state`.
    pub fn new(engine: E, state: E::State, config: MCTSConfig) -> Self {
        let perspective = config.perspective.unwrap_or_else(|| engine.to_move(&state));
        // At most one node is added per iteration.
        let capacity = config.max_nodes.min(config.iterations as usize + 1);
        let root = MCTSNode::root(&engine, state);

        Self {
            rng: GameRng::new(config.seed),
            tree: MCTSTree::with_capacity(root, capacity),
            engine,
            config,
            perspective,
            selection: Box::new(Uct),
            simulation: Box::new(RandomSimulation),
            stats: SearchStats::default(),
        }
    }

    /// Set a custom selection policy.
    pub fn with_selection<S: SelectionPolicy + 'static>(mut self, selection: S) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Set a custom simulation policy.
    pub fn with_simulation<S: SimulationPolicy<E> + 'static>(mut self, simulation: S) -> Self {
        self.simulation = Box::new(simulation);
        self
    }

    /// Run the search and return the chosen move.
    ///
    /// `Ok(None)` means the root has no move to offer (game over or no
    /// legal moves).
    pub fn search(&mut self) -> Result<Option<E::Move>> {
        let best = self.best_action()?;
        Ok(best.and_then(|id| self.tree.get(id).originating_move.clone()))
    }

    /// Run the configured iterations and return the best root child.
    ///
    /// The final choice uses `final_exploration`.
    pub fn best_action(&mut self) -> Result<Option<NodeId>> {
        self.config.validate()?;
        let start = Instant::now();
        self.stats.reset();

        let root = self.tree.root();
        let root_node = self.tree.get(root);
        if root_node.is_terminal || (root_node.is_fully_expanded() && root_node.children.is_empty()) {
            debug!(terminal = root_node.is_terminal, "no move available at root");
            return Ok(None);
        }

        debug!(
            iterations = self.config.iterations,
            seed = self.config.seed,
            legal_moves = root_node.pending_moves.len() + root_node.children.len(),
            perspective = %self.perspective,
            "starting search"
        );

        let deadline = self
            .config
            .time_limit_ms
            .map(|ms| start + Duration::from_millis(ms));

        for i in 0..self.config.iterations {
            // Always leave room for one full iteration.
            if i > 0 {
                if deadline.is_some_and(|d| Instant::now() >= d) {
                    warn!(completed = i, "time limit reached, stopping search");
                    break;
                }
                if self.tree.len() >= self.config.max_nodes {
                    warn!(completed = i, nodes = self.tree.len(), "node limit reached, stopping search");
                    break;
                }
            }
            self.iteration()?;
        }

        self.stats.time_us = start.elapsed().as_micros() as u64;

        let best = self.best_child(root, self.config.final_exploration);
        if best == root {
            return Ok(None);
        }

        debug!(
            iterations = self.stats.iterations,
            nodes = self.tree.len(),
            time_us = self.stats.time_us,
            chosen = ?self.tree.get(best).originating_move,
            visits = self.tree.get(best).visits,
            "search finished"
        );
        Ok(Some(best))
    }

    /// Single MCTS iteration: select/expand, roll out, backpropagate.
    pub fn iteration(&mut self) -> Result<()> {
        let leaf = self.tree_policy()?;
        let outcome = self.rollout(leaf)?;
        self.backpropagate(leaf, outcome);
        self.stats.iterations += 1;
        Ok(())
    }

    /// Walk down from the root to the node the next rollout starts from.
    ///
    /// Stops at a terminal node, expands the first node with pending moves
    /// and returns the new child, and otherwise follows `best_child` with
    /// the descent constant. A non-terminal node with neither pending moves
    /// nor children is returned as-is.
    pub fn tree_policy(&mut self) -> Result<NodeId> {
        let mut current = self.tree.root();

        loop {
            let node = self.tree.get(current);

            if node.is_terminal {
                return Ok(current);
            }

            if !node.is_fully_expanded() {
                return self.expand(current);
            }

            if node.children.is_empty() {
                return Ok(current);
            }

            current = self.best_child(current, self.config.tree_exploration);
        }
    }

    /// Turn one pending move of `node_id` into a new child and return it.
    ///
    /// Fails with `Error::NotExpandable` on a terminal or fully expanded
    /// node, and with the rules' error if the move does not apply.
    pub fn expand(&mut self, node_id: NodeId) -> Result<NodeId> {
        let node = self.tree.get_mut(node_id);
        if node.is_terminal {
            return Err(Error::NotExpandable { node: node_id.raw() });
        }
        let mv = node
            .pending_moves
            .last()
            .cloned()
            .ok_or(Error::NotExpandable { node: node_id.raw() })?;

        let state = self.engine.apply_move(&node.state, &mv)?;
        node.pending_moves.pop();
        let depth = node.depth + 1;

        let child = MCTSNode::new(&self.engine, state, node_id, Some(mv), depth);
        let child_id = self.tree.alloc(child);
        self.tree.get_mut(node_id).children.push(child_id);

        self.stats.nodes_expanded += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);
        trace!(
            parent = %node_id,
            child = %child_id,
            mv = ?self.tree.get(child_id).originating_move,
            "expanded"
        );

        Ok(child_id)
    }

    /// Play a random game out from `node_id` on a copy of its state.
    pub fn rollout(&mut self, node_id: NodeId) -> Result<Outcome> {
        let mut rng = self.rng.fork();
        let state = &self.tree.get(node_id).state;
        let rollout = self.simulation.simulate(&self.engine, state, &mut rng)?;

        self.stats.rollouts += 1;
        self.stats.rollout_moves += u64::from(rollout.moves);

        let outcome = Outcome::from_result(rollout.result, self.perspective);
        trace!(node = %node_id, moves = rollout.moves, ?outcome, "rollout");
        Ok(outcome)
    }

    /// Record `outcome` on `node_id` and every ancestor up to the root.
    pub fn backpropagate(&mut self, node_id: NodeId, outcome: Outcome) {
        let mut current = node_id;
        while !current.is_none() {
            let node = self.tree.get_mut(current);
            node.visits += 1;
            node.tally.record(outcome);
            current = node.parent;
        }
    }

    /// The child of `node_id` with the highest score under `exploration`.
    ///
    /// Ties go to the earliest child. A node without children returns
    /// itself.
    #[must_use]
    pub fn best_child(&self, node_id: NodeId, exploration: f64) -> NodeId {
        let node = self.tree.get(node_id);
        let children = node.children.iter().map(|&c| {
            let child = self.tree.get(c);
            (child.visits, &child.tally)
        });

        match select_best(self.selection.as_ref(), node.visits, children, exploration) {
            Some(i) => node.children[i],
            None => node_id,
        }
    }

    /// Get search statistics.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the search tree.
    #[must_use]
    pub fn tree(&self) -> &MCTSTree<E::State, E::Move> {
        &self.tree
    }

    /// Player whose outcomes are tallied.
    #[must_use]
    pub fn perspective(&self) -> Player {
        self.perspective
    }

    /// Root children as (move, visits, tally), in expansion order.
    pub fn root_children(&self) -> Vec<(E::Move, u32, OutcomeTally)> {
        self.tree
            .children(self.tree.root())
            .filter_map(|(_, child)| {
                child
                    .originating_move
                    .clone()
                    .map(|mv| (mv, child.visits, child.tally))
            })
            .collect()
    }

    /// Visit-count distribution over root moves.
    ///
    /// Returns (move, probability) pairs where probabilities sum to ~1.0.
    pub fn action_probabilities(&self) -> Vec<(E::Move, f64)> {
        let children = self.root_children();
        let total: u32 = children.iter().map(|(_, visits, _)| visits).sum();

        if total == 0 {
            let uniform = 1.0 / children.len().max(1) as f64;
            return children.into_iter().map(|(mv, _, _)| (mv, uniform)).collect();
        }

        children
            .into_iter()
            .map(|(mv, visits, _)| (mv, visits as f64 / total as f64))
            .collect()
    }

    /// Get the engine reference.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Get the configuration.
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }
}

/// Pick a move for the player to move in `state`.
///
/// Builds a fresh tree, runs `config.iterations` iterations and returns the
/// move of the best root child, or `None` if the position offers no move.
pub fn select_move<E: RulesEngine>(engine: E, state: E::State, config: MCTSConfig) -> Result<Option<E::Move>> {
    MCTSSearch::new(engine, state, config).search()
}
