//! Search tree node representation.
//!
//! Each node owns a full copy of the game state reached by playing one column
//! from its parent, plus the visit statistics used by UCB selection.

use game_board::{GameState, Move, Outcome, Side};

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Id for the arena slot at `index`.
    ///
    /// # Panics
    /// When the index does not fit below `NONE`; the arena is full.
    pub fn from_index(index: usize) -> NodeId {
        match u32::try_from(index) {
            Ok(raw) if raw != u32::MAX => NodeId(raw),
            _ => panic!("search tree arena is full ({} nodes)", index),
        }
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the search tree.
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// Parent node index (NONE for root)
    parent: NodeId,

    /// Distance from the root
    depth: u32,

    /// Game state after this node's move
    state: GameState,

    /// Outcome of this node's move, `Ongoing` for the root
    outcome: Outcome,

    /// Number of completed cycles that passed through this node
    visits: u32,

    /// Sum of terminal values backed up through this node, computer perspective
    value_sum: f64,

    /// Columns not yet expanded. Order carries no meaning.
    untried: Vec<usize>,

    /// Child per column, NONE where the column is untried or illegal
    children: Vec<NodeId>,
}

impl SearchNode {
    /// Create the root node from the live position.
    pub fn new_root(state: GameState) -> Self {
        // The live position is searched even if its last move decided it.
        Self::new(NodeId::NONE, 0, state, Outcome::Ongoing)
    }

    /// Create a child node for a state one move below `parent`.
    pub fn new_child(parent: NodeId, depth: u32, state: GameState) -> Self {
        let outcome = state.outcome();
        Self::new(parent, depth, state, outcome)
    }

    fn new(parent: NodeId, depth: u32, state: GameState, outcome: Outcome) -> Self {
        // Terminal positions are never expanded.
        let untried = if outcome.is_terminal() {
            Vec::new()
        } else {
            state.legal_columns()
        };
        let children = vec![NodeId::NONE; state.geometry().cols()];

        Self {
            parent,
            depth,
            state,
            outcome,
            visits: 0,
            value_sum: 0.0,
            untried,
            children,
        }
    }

    #[inline]
    pub fn parent(&self) -> NodeId {
        self.parent
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Move that produced this node, `None` for the root.
    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.state.last_move()
    }

    /// Side to move at this node.
    #[inline]
    pub fn to_move(&self) -> Side {
        self.state.to_move()
    }

    #[inline]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// The root is never terminal; any other node is terminal when its move
    /// won or filled the board.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    #[inline]
    pub fn is_expandable(&self) -> bool {
        !self.untried.is_empty()
    }

    #[inline]
    pub fn untried(&self) -> &[usize] {
        &self.untried
    }

    #[inline]
    pub fn visits(&self) -> u32 {
        self.visits
    }

    #[inline]
    pub fn value_sum(&self) -> f64 {
        self.value_sum
    }

    /// Average backed-up value W / N, computer perspective.
    /// Returns 0.0 if never visited.
    #[inline]
    pub fn mean_value(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.value_sum / self.visits as f64
        }
    }

    /// Record one completed cycle through this node.
    #[inline]
    pub(crate) fn record(&mut self, delta: f64) {
        self.visits += 1;
        self.value_sum += delta;
    }

    /// Child created for `column`, if any.
    #[inline]
    pub fn child(&self, column: usize) -> Option<NodeId> {
        self.children
            .get(column)
            .copied()
            .filter(|id| id.is_some())
    }

    /// Realized children as (column, id) pairs in column order.
    pub fn children(&self) -> impl Iterator<Item = (usize, NodeId)> + '_ {
        self.children
            .iter()
            .enumerate()
            .filter(|(_, id)| id.is_some())
            .map(|(col, id)| (col, *id))
    }

    #[inline]
    pub fn has_children(&self) -> bool {
        self.children.iter().any(|id| id.is_some())
    }

    /// Remove the untried column at `index` (swap-remove, O(1)).
    pub(crate) fn take_untried(&mut self, index: usize) -> usize {
        self.untried.swap_remove(index)
    }

    pub(crate) fn link_child(&mut self, column: usize, child: NodeId) {
        debug_assert!(self.children[column].is_none());
        self.children[column] = child;
    }

    /// UCB1 score of this node as seen from its parent.
    ///
    /// `score = perspective * W/N + c * sqrt(2 ln N_parent / N)`
    ///
    /// Values are stored from the computer's point of view, so `perspective`
    /// is -1 when the player is to move at the parent: each side maximizes
    /// its own expected value. Unvisited nodes score +inf.
    ///
    /// Takes a pre-computed `ln(N_parent)` to avoid redundant logs when
    /// comparing siblings.
    #[inline]
    pub fn ucb_score(&self, parent_visits_ln: f64, exploration: f64, perspective: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let n = self.visits as f64;
        perspective * self.value_sum / n + exploration * (2.0 * parent_visits_ln / n).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> SearchNode {
        SearchNode::new_root(GameState::empty(6, 7, None, Side::Computer).unwrap())
    }

    #[test]
    fn test_node_id_none() {
        assert!(NodeId::NONE.is_none());
        assert!(!NodeId::NONE.is_some());
        assert!(!NodeId(0).is_none());
        assert!(NodeId(0).is_some());
    }

    #[test]
    fn test_new_root() {
        let node = root();

        assert!(node.parent().is_none());
        assert_eq!(node.depth(), 0);
        assert_eq!(node.visits(), 0);
        assert!(!node.is_terminal());
        assert!(node.is_expandable());
        assert!(!node.has_children());
        assert!(node.last_move().is_none());
        assert_eq!(node.to_move(), Side::Computer);

        let mut untried = node.untried().to_vec();
        untried.sort_unstable();
        assert_eq!(untried, (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn test_full_columns_are_not_untried() {
        let mut state = GameState::empty(2, 3, None, Side::Computer).unwrap();
        state.apply_move(1);
        state.apply_move(1);
        let node = SearchNode::new_child(NodeId(0), 1, state);

        let mut untried = node.untried().to_vec();
        untried.sort_unstable();
        assert_eq!(untried, vec![0, 2]);
    }

    #[test]
    fn test_terminal_child() {
        let mut state = GameState::empty(1, 4, None, Side::Computer).unwrap();
        for col in 0..3 {
            state.place(col, Side::Computer);
        }
        state.apply_move(3);
        let node = SearchNode::new_child(NodeId(0), 1, state);

        assert!(node.is_terminal());
        assert_eq!(node.outcome(), Outcome::ComputerWin);
        assert!(!node.is_expandable());
    }

    #[test]
    fn test_root_is_never_terminal() {
        let mut state = GameState::empty(1, 5, None, Side::Computer).unwrap();
        for col in 0..3 {
            state.place(col, Side::Computer);
        }
        state.apply_move(3);
        assert_eq!(state.outcome(), Outcome::ComputerWin);

        let node = SearchNode::new_root(state);
        assert!(!node.is_terminal());
        assert_eq!(node.untried(), &[4]);
    }

    #[test]
    fn test_mean_value() {
        let mut node = root();

        // Unvisited
        assert!(node.mean_value().abs() < 1e-12);

        node.record(1.0);
        node.record(-1.0);
        node.record(1.0);
        node.record(1.0);
        assert_eq!(node.visits(), 4);
        assert!((node.value_sum() - 2.0).abs() < 1e-12);
        assert!((node.mean_value() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_ucb_score() {
        let mut node = root();
        for _ in 0..10 {
            node.record(0.5);
        }

        let ln_parent = (100.0f64).ln();
        // 0.5 + 0.8 * sqrt(2 * ln(100) / 10)
        let expected = 0.5 + 0.8 * (2.0 * ln_parent / 10.0).sqrt();
        assert!((node.ucb_score(ln_parent, 0.8, 1.0) - expected).abs() < 1e-9);

        // Flipped perspective only negates the exploitation term.
        let flipped = -0.5 + 0.8 * (2.0 * ln_parent / 10.0).sqrt();
        assert!((node.ucb_score(ln_parent, 0.8, -1.0) - flipped).abs() < 1e-9);
    }

    #[test]
    fn test_unvisited_scores_infinite() {
        let node = root();
        assert_eq!(node.ucb_score(1.0, 0.8, 1.0), f64::INFINITY);
    }

    #[test]
    fn test_child_links() {
        let mut node = root();
        assert!(node.child(2).is_none());

        node.link_child(2, NodeId(5));
        assert_eq!(node.child(2), Some(NodeId(5)));
        assert!(node.child(99).is_none());
        assert_eq!(node.children().collect::<Vec<_>>(), vec![(2, NodeId(5))]);
        assert!(node.has_children());
    }

    #[test]
    fn test_node_id_from_index() {
        assert_eq!(NodeId::from_index(0), NodeId(0));
        assert_eq!(NodeId::from_index(41), NodeId(41));
        assert_eq!(NodeId::from_index(u32::MAX as usize - 1), NodeId(u32::MAX - 1));
    }

    #[test]
    #[should_panic(expected = "arena is full")]
    fn test_node_id_from_index_rejects_none_slot() {
        NodeId::from_index(u32::MAX as usize);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    #[should_panic(expected = "arena is full")]
    fn test_node_id_from_index_rejects_overflow() {
        NodeId::from_index(u32::MAX as usize + 1);
    }
}
