//! Search engine: the time-bounded UCT loop.
//!
//! Every cycle runs four phases against the tree rooted at the live position:
//! 1. Selection: descend with UCB1 until a terminal or expandable node
//! 2. Expansion: add one random untried column below an expandable node
//! 3. Rollout: play the selected position out at random
//! 4. Backpropagation: add the terminal value to every node up to the root
//!
//! The budget is polled between cycles, so the loop can overrun its deadline
//! by at most one cycle.

use std::time::{Duration, Instant};

use game_board::{BoardError, GameState, Move, Side};
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, trace};

use crate::budget::Budget;
use crate::config::SearchConfig;
use crate::node::NodeId;
use crate::rollout::{RolloutPolicy, UniformRollout};
use crate::tree::{ChildSummary, SearchTree, TreeStats};

/// Errors that can occur before a search starts.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid position: {0}")]
    InvalidPosition(#[from] BoardError),

    #[error("No legal moves available")]
    NoLegalMoves,
}

/// Statistics of one decision.
#[derive(Debug, Clone, Serialize)]
pub struct SearchStats {
    /// Completed select/rollout/backup cycles
    pub cycles: u64,
    /// Wall-clock time spent searching
    pub elapsed: Duration,
    /// Tree size and root statistics
    pub tree: TreeStats,
}

impl SearchStats {
    /// Cycles per second, 0 when no time was measured.
    pub fn cycles_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.cycles as f64 / secs
        } else {
            0.0
        }
    }
}

/// Result of a search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    /// Recommended move
    pub mv: Move,

    /// Visits of the chosen root child
    pub visits: u32,

    /// Average value of the chosen child, computer perspective
    pub value: f64,

    /// Per-column statistics of the root's children
    pub children: Vec<ChildSummary>,

    pub stats: SearchStats,
}

/// Search state for one move decision.
pub struct SearchEngine<B: Budget, P: RolloutPolicy = UniformRollout> {
    tree: SearchTree,
    config: SearchConfig,
    budget: B,
    policy: P,
    cycles: u64,
    /// Set once the budget is spent; no further cycles run afterwards.
    done: bool,
}

impl<B: Budget> SearchEngine<B> {
    /// Create a new search rooted at `state` with the uniform rollout policy.
    pub fn new(state: GameState, config: SearchConfig, budget: B) -> Result<Self, SearchError> {
        Self::with_policy(state, config, budget, UniformRollout)
    }
}

impl<B: Budget, P: RolloutPolicy> SearchEngine<B, P> {
    /// Create a new search with a custom rollout policy.
    pub fn with_policy(
        state: GameState,
        config: SearchConfig,
        budget: B,
        policy: P,
    ) -> Result<Self, SearchError> {
        if state.legal_columns().is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        Ok(Self {
            tree: SearchTree::new(state),
            config,
            budget,
            policy,
            cycles: 0,
            done: false,
        })
    }

    /// Run cycles until the budget is exhausted and return the recommended
    /// move. At least one cycle always runs, so the root has a child to pick.
    /// Calling `run` again after it finished only recomputes the answer.
    pub fn run(&mut self, rng: &mut ChaCha20Rng) -> Result<SearchResult, SearchError> {
        let started = Instant::now();

        while !self.done {
            self.cycle(rng);
            self.done = self.budget.exhausted(self.cycles);
        }

        let best_id = self
            .tree
            .best_root_child(self.config.final_choice, self.config.exploration, rng)
            .ok_or(SearchError::NoLegalMoves)?;
        let best = self.tree.get(best_id);
        let mv = best.last_move().ok_or(SearchError::NoLegalMoves)?;

        let stats = SearchStats {
            cycles: self.cycles,
            elapsed: started.elapsed(),
            tree: self.tree.stats(),
        };

        debug!(
            row = mv.row,
            col = mv.col,
            visits = best.visits(),
            value = best.mean_value(),
            cycles = stats.cycles,
            nodes = stats.tree.total_nodes,
            max_depth = stats.tree.max_depth,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            rule = %self.config.final_choice,
            "Search complete"
        );

        Ok(SearchResult {
            mv,
            visits: best.visits(),
            value: best.mean_value(),
            children: self.tree.root_children(),
            stats,
        })
    }

    /// Run a single cycle (select/expand -> rollout -> backpropagate).
    pub fn cycle(&mut self, rng: &mut ChaCha20Rng) {
        let selected = self.tree_policy(rng);

        let node = self.tree.get(selected);
        let value = self.policy.rollout(node.state(), rng);
        let depth = node.depth();

        self.tree.backup(selected, value);
        self.cycles += 1;

        trace!(
            cycle = self.cycles,
            node = selected.0,
            depth,
            value,
            "Search cycle complete"
        );
    }

    /// Descend from the root until a node is expanded or a terminal node is
    /// reached; return the node to simulate from.
    fn tree_policy(&mut self, rng: &mut ChaCha20Rng) -> NodeId {
        let mut current = self.tree.root();

        loop {
            let node = self.tree.get(current);
            if node.is_terminal() {
                return current;
            }
            if node.is_expandable() {
                return self.tree.expand(current, rng);
            }
            current = self
                .tree
                .select_best_child(current, self.config.exploration, rng);
        }
    }

    /// True once the budget has been spent.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Completed cycles so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }
}

/// Run one search from `state` under `budget` and return the full result.
pub fn run_search<B: Budget>(
    state: GameState,
    config: SearchConfig,
    budget: B,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult, SearchError> {
    let mut engine = SearchEngine::new(state, config, budget)?;
    engine.run(rng)
}

/// Choose a move for the side to move at `state`.
pub fn choose_move<B: Budget>(
    state: GameState,
    config: SearchConfig,
    budget: B,
    rng: &mut ChaCha20Rng,
) -> Result<Move, SearchError> {
    run_search(state, config, budget, rng).map(|result| result.mv)
}

/// Choose a move under the config's own budget: a deadline of
/// `time_budget` starting now, capped by `max_cycles` when set.
pub fn choose_move_with_deadline(
    state: GameState,
    config: SearchConfig,
    rng: &mut ChaCha20Rng,
) -> Result<Move, SearchError> {
    let budget = config.budget();
    choose_move(state, config, budget, rng)
}

/// Choose a move for the computer from the flat arrays of a host platform.
///
/// `cells` is row-major with row 0 at the top (0 empty, 1 player,
/// 2 computer) and `top[c]` is the height of column `c`.
pub fn choose_point(
    rows: usize,
    cols: usize,
    top: &[i32],
    cells: &[i32],
    forbidden: Option<(usize, usize)>,
    config: SearchConfig,
    rng: &mut ChaCha20Rng,
) -> Result<Move, SearchError> {
    let state = GameState::from_flat(rows, cols, top, cells, forbidden, Side::Computer)?;
    choose_move_with_deadline(state, config, rng)
}
