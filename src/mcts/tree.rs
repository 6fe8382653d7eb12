//! Arena-based MCTS tree.
//!
//! Uses a flat `Vec<MCTSNode>` with index-based references. The whole tree
//! belongs to one search and is dropped with it.

use serde::{Deserialize, Serialize};

use super::node::{MCTSNode, NodeId};

/// Arena-based MCTS tree.
///
/// Nodes are stored in a flat vector and referenced by `NodeId` indices.
/// Nodes are only ever appended, so an id stays valid for the tree's life.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSTree<S, M> {
    /// All nodes in the tree.
    nodes: Vec<MCTSNode<S, M>>,

    /// The root node ID (always 0).
    root: NodeId,
}

impl<S, M> MCTSTree<S, M> {
    /// Create a tree holding only `root`.
    pub fn new(root: MCTSNode<S, M>) -> Self {
        Self::with_capacity(root, 1024)
    }

    /// Create a tree with custom initial capacity.
    pub fn with_capacity(root: MCTSNode<S, M>, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(root);
        Self {
            nodes,
            root: NodeId::new(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &MCTSNode<S, M> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MCTSNode<S, M> {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node, returning its ID.
    pub fn alloc(&mut self, node: MCTSNode<S, M>) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the root node.
    #[must_use]
    pub fn root_node(&self) -> &MCTSNode<S, M> {
        self.get(self.root)
    }

    /// Children of `id` with their nodes, in expansion order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &MCTSNode<S, M>)> {
        self.get(id).children.iter().map(move |&c| (c, self.get(c)))
    }

    /// Iterate over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &MCTSNode<S, M>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }

    /// Get statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let max_depth = self.nodes.iter().map(|n| n.depth).max().unwrap_or(0);
        let terminal_count = self.nodes.iter().filter(|n| n.is_terminal).count();
        let fully_expanded_count = self.nodes.iter().filter(|n| n.is_fully_expanded()).count();
        let child_links: usize = self.nodes.iter().map(|n| n.children.len()).sum();
        let interior_count = self.nodes.iter().filter(|n| !n.children.is_empty()).count();

        TreeStats {
            node_count: self.nodes.len(),
            max_depth,
            terminal_count,
            fully_expanded_count,
            child_links,
            interior_count,
        }
    }
}

/// Statistics about the MCTS tree.
#[derive(Clone, Debug, Default)]
pub struct TreeStats {
    /// Total number of nodes.
    pub node_count: usize,

    /// Maximum depth reached.
    pub max_depth: u16,

    /// Number of terminal nodes.
    pub terminal_count: usize,

    /// Nodes with no pending moves left.
    pub fully_expanded_count: usize,

    /// Total parent-to-child links.
    pub child_links: usize,

    /// Nodes with at least one child.
    pub interior_count: usize,
}

impl TreeStats {
    /// Average children per node that has any.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.interior_count == 0 {
            0.0
        } else {
            self.child_links as f64 / self.interior_count as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Player;
    use crate::games::ultimate::{UltimateMove, UltimateRules, UltimateState};

    type Tree = MCTSTree<UltimateState, UltimateMove>;

    fn new_tree() -> Tree {
        MCTSTree::new(MCTSNode::root(&UltimateRules, UltimateState::new()))
    }

    fn add_child(tree: &mut Tree, parent: NodeId, mv: UltimateMove) -> NodeId {
        let parent_node = tree.get(parent);
        let state = parent_node.state.with_move_unchecked(&mv);
        let depth = parent_node.depth + 1;
        let child = tree.alloc(MCTSNode::new(&UltimateRules, state, parent, Some(mv), depth));
        tree.get_mut(parent).children.push(child);
        child
    }

    #[test]
    fn test_tree_new() {
        let tree = new_tree();

        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert_eq!(tree.root(), NodeId::new(0));
        assert!(tree.root_node().is_root());
    }

    #[test]
    fn test_tree_alloc() {
        let mut tree = new_tree();
        let root = tree.root();

        let child_id = add_child(&mut tree, root, UltimateMove::new(0, 0, 0, Player::X));

        assert_eq!(child_id, NodeId::new(1));
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get(child_id).parent, root);
        assert_eq!(tree.get(child_id).state.to_move(), Player::O);
    }

    #[test]
    fn test_tree_get_mut() {
        let mut tree = new_tree();

        tree.get_mut(tree.root()).visits = 100;

        assert_eq!(tree.get(tree.root()).visits, 100);
    }

    #[test]
    fn test_children_in_expansion_order() {
        let mut tree = new_tree();
        let root = tree.root();
        let a = add_child(&mut tree, root, UltimateMove::new(0, 0, 0, Player::X));
        let b = add_child(&mut tree, root, UltimateMove::new(8, 2, 2, Player::X));

        let children: Vec<_> = tree.children(root).map(|(id, _)| id).collect();
        assert_eq!(children, vec![a, b]);
    }

    #[test]
    fn test_tree_stats() {
        let mut tree = new_tree();
        let root = tree.root();
        let child = add_child(&mut tree, root, UltimateMove::new(4, 1, 1, Player::X));
        add_child(&mut tree, child, UltimateMove::new(4, 0, 0, Player::O));
        add_child(&mut tree, root, UltimateMove::new(0, 0, 0, Player::X));

        let stats = tree.stats();

        assert_eq!(stats.node_count, 4);
        assert_eq!(stats.max_depth, 2);
        assert_eq!(stats.terminal_count, 0);
        assert_eq!(stats.child_links, 3);
        assert_eq!(stats.interior_count, 2);
        assert_eq!(stats.branching_factor(), 1.5);
    }

    #[test]
    fn test_tree_iter() {
        let mut tree = new_tree();
        let root = tree.root();
        add_child(&mut tree, root, UltimateMove::new(0, 0, 0, Player::X));

        let nodes: Vec<_> = tree.iter().collect();

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].0, NodeId::new(0));
        assert_eq!(nodes[1].0, NodeId::new(1));
    }

    #[test]
    fn test_tree_serialization() {
        let mut tree = new_tree();
        tree.get_mut(tree.root()).visits = 50;
        let root = tree.root();
        add_child(&mut tree, root, UltimateMove::new(0, 0, 0, Player::X));

        let json = serde_json::to_string(&tree).unwrap();
        let deserialized: Tree = serde_json::from_str(&json).unwrap();

        assert_eq!(tree.len(), deserialized.len());
        assert_eq!(tree.root_node().visits, deserialized.root_node().visits);
    }
}
