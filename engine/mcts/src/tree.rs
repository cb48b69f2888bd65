//! Search tree structure with arena allocation.
//!
//! Nodes are stored in a contiguous Vec and referenced by NodeId indices.
//! Parents point up by index and children are kept in a per-column table,
//! so dropping the tree releases every node at once.

use game_board::GameState;
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;

use crate::config::FinalChoice;
use crate::node::{NodeId, SearchNode};

/// Search tree with arena-based node storage.
#[derive(Debug)]
pub struct SearchTree {
    /// Arena storing all nodes
    nodes: Vec<SearchNode>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl SearchTree {
    /// Create a new tree rooted at the live position.
    pub fn new(root_state: GameState) -> Self {
        Self {
            nodes: vec![SearchNode::new_root(root_state)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0 as usize]
    }

    fn allocate(&mut self, node: SearchNode) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn arena(&self) -> &[SearchNode] {
        &self.nodes
    }

    /// Expand one untried column of `node_id`, chosen uniformly at random.
    ///
    /// The parent's side to move drops the piece; the child is linked under
    /// that column and the column leaves the untried set.
    ///
    /// # Panics
    ///
    /// Panics if the node has no untried column.
    pub fn expand(&mut self, node_id: NodeId, rng: &mut ChaCha20Rng) -> NodeId {
        let node = self.get_mut(node_id);
        assert!(
            node.is_expandable(),
            "expand called on node {} with no untried columns",
            node_id.0
        );

        let index = rng.gen_range(0..node.untried().len());
        let column = node.take_untried(index);
        let state = node.state().play(column);
        let depth = node.depth() + 1;

        let child_id = self.allocate(SearchNode::new_child(node_id, depth, state));
        self.get_mut(node_id).link_child(column, child_id);

        child_id
    }

    /// Select the child of `node_id` with the highest UCB1 score.
    ///
    /// Exact ties are broken uniformly at random.
    ///
    /// # Panics
    ///
    /// Panics if the node has no children.
    pub fn select_best_child(
        &self,
        node_id: NodeId,
        exploration: f64,
        rng: &mut ChaCha20Rng,
    ) -> NodeId {
        let node = self.get(node_id);
        // Pre-compute ln once instead of per-child comparison
        let parent_visits_ln = (node.visits() as f64).ln();
        let perspective = node.to_move().perspective();

        self.argmax(node, rng, |child| {
            (child.ucb_score(parent_visits_ln, exploration, perspective), 0.0)
        })
        .unwrap_or_else(|| panic!("select_best_child called on node {} with no children", node_id.0))
    }

    /// Backpropagate a value from a node up to and including the root.
    ///
    /// The same computer-perspective value is added at every level; the sign
    /// is only adjusted at selection time.
    pub fn backup(&mut self, node_id: NodeId, delta: f64) {
        let mut current_id = node_id;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.record(delta);
            current_id = node.parent();
        }
    }

    /// The recommended child of the root under `choice`, `None` when the root
    /// has never been expanded.
    pub fn best_root_child(
        &self,
        choice: FinalChoice,
        exploration: f64,
        rng: &mut ChaCha20Rng,
    ) -> Option<NodeId> {
        let root = self.get(self.root);
        let perspective = root.to_move().perspective();

        match choice {
            FinalChoice::Ucb => {
                if root.has_children() {
                    Some(self.select_best_child(self.root, exploration, rng))
                } else {
                    None
                }
            }
            FinalChoice::MeanValue => self.argmax(root, rng, |child| {
                (perspective * child.mean_value(), child.visits() as f64)
            }),
            FinalChoice::MostVisited => self.argmax(root, rng, |child| {
                (child.visits() as f64, perspective * child.mean_value())
            }),
        }
    }

    /// Child maximizing `key` (compared lexicographically), remaining ties
    /// broken uniformly at random.
    fn argmax<F>(&self, node: &SearchNode, rng: &mut ChaCha20Rng, key: F) -> Option<NodeId>
    where
        F: Fn(&SearchNode) -> (f64, f64),
    {
        let mut best: Option<(NodeId, (f64, f64))> = None;
        let mut ties = 0u32;

        for (_, child_id) in node.children() {
            let score = key(self.get(child_id));
            match best {
                Some((_, best_score)) if score < best_score => {}
                Some((_, best_score)) if score == best_score => {
                    // Reservoir sampling keeps every tied child equally likely.
                    ties += 1;
                    if rng.gen_range(0..ties) == 0 {
                        best = Some((child_id, score));
                    }
                }
                _ => {
                    best = Some((child_id, score));
                    ties = 1;
                }
            }
        }

        best.map(|(id, _)| id)
    }

    /// Per-column summary of the root's children.
    pub fn root_children(&self) -> Vec<ChildSummary> {
        let root = self.get(self.root);
        root.children()
            .map(|(column, id)| {
                let child = self.get(id);
                let mv = child.last_move();
                ChildSummary {
                    column,
                    row: mv.map(|m| m.row).unwrap_or_default(),
                    visits: child.visits(),
                    mean_value: child.mean_value(),
                    terminal: child.is_terminal(),
                }
            })
            .collect()
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visits(),
            root_value: root.mean_value(),
            max_depth: self.nodes.iter().map(SearchNode::depth).max().unwrap_or(0),
        }
    }
}

/// Statistics about a search tree.
#[derive(Debug, Clone, Serialize)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_value: f64,
    pub max_depth: u32,
}

/// Visit statistics of one root child.
#[derive(Debug, Clone, Serialize)]
pub struct ChildSummary {
    pub column: usize,
    pub row: usize,
    pub visits: u32,
    /// Average value, computer perspective
    pub mean_value: f64,
    pub terminal: bool,
}
