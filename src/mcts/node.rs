//! MCTS node structures.
//!
//! Nodes live in an arena (`MCTSTree`) and refer to each other by `NodeId`.
//! The parent link is a plain index, so the tree never holds a second owner
//! of any node.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Player;
use crate::rules::{GameResult, RulesEngine};

/// Index into the MCTSTree node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// A finished game as seen by the search's perspective player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    /// Relabel a game result for `perspective`.
    #[must_use]
    pub fn from_result(result: GameResult, perspective: Player) -> Self {
        match result {
            GameResult::Winner(p) if p == perspective => Outcome::Win,
            GameResult::Winner(_) => Outcome::Loss,
            GameResult::Draw => Outcome::Draw,
        }
    }

    const fn slot(self) -> usize {
        match self {
            Outcome::Win => 0,
            Outcome::Loss => 1,
            Outcome::Draw => 2,
        }
    }
}

/// Per-outcome counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeTally {
    counts: [u32; 3],
}

impl OutcomeTally {
    /// Count one more `outcome`.
    pub fn record(&mut self, outcome: Outcome) {
        self.counts[outcome.slot()] += 1;
    }

    /// Times `outcome` was recorded.
    #[must_use]
    pub fn get(&self, outcome: Outcome) -> u32 {
        self.counts[outcome.slot()]
    }

    #[must_use]
    pub fn wins(&self) -> u32 {
        self.get(Outcome::Win)
    }

    #[must_use]
    pub fn losses(&self) -> u32 {
        self.get(Outcome::Loss)
    }

    #[must_use]
    pub fn draws(&self) -> u32 {
        self.get(Outcome::Draw)
    }

    /// Sum over all outcomes.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Wins minus losses; draws count for neither side.
    #[must_use]
    pub fn net_wins(&self) -> i64 {
        i64::from(self.wins()) - i64::from(self.losses())
    }
}

/// A node in the MCTS tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSNode<S, M> {
    /// Position at this node. Never modified after creation.
    pub state: S,

    /// Parent node (NONE for root).
    pub parent: NodeId,

    /// Move applied to the parent's state to reach this one (None for root).
    pub originating_move: Option<M>,

    /// Children in expansion order.
    pub children: SmallVec<[NodeId; 9]>,

    /// Times this node took part in a backpropagation.
    pub visits: u32,

    /// Rollout outcomes seen through this node.
    pub tally: OutcomeTally,

    /// Legal moves not yet turned into children.
    pub pending_moves: Vec<M>,

    /// Is this a finished game?
    pub is_terminal: bool,

    /// Depth in tree (root = 0).
    pub depth: u16,
}

impl<S, M> MCTSNode<S, M> {
    /// Create a node, asking `rules` for the moves still to expand.
    pub fn new<R>(rules: &R, state: S, parent: NodeId, originating_move: Option<M>, depth: u16) -> Self
    where
        R: RulesEngine<State = S, Move = M>,
    {
        let pending_moves = rules.legal_moves(&state);
        let is_terminal = rules.is_terminal(&state);
        Self {
            state,
            parent,
            originating_move,
            children: SmallVec::new(),
            visits: 0,
            tally: OutcomeTally::default(),
            pending_moves,
            is_terminal,
            depth,
        }
    }

    /// Create a root node.
    pub fn root<R>(rules: &R, state: S) -> Self
    where
        R: RulesEngine<State = S, Move = M>,
    {
        Self::new(rules, state, NodeId::NONE, None, 0)
    }

    /// Check if the node is the root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Every legal move has a child.
    #[must_use]
    pub fn is_fully_expanded(&self) -> bool {
        self.pending_moves.is_empty()
    }
}
