//! Upper Confidence Trees (UCT) move selection for the gravity connection game.
//!
//! Given the live position, the engine grows a search tree for as long as its
//! budget allows and then recommends a column for the side to move.
//!
//! # Overview
//!
//! Each search cycle consists of four phases:
//!
//! 1. **Selection**: Descend from the root with UCB1, each side maximizing its
//!    own expected value
//! 2. **Expansion**: At the first node with untried columns, add one child for
//!    a random untried column
//! 3. **Rollout**: Play the new position out with uniformly random moves
//! 4. **Backpropagation**: Add the terminal value (+1 computer win, -1 player
//!    win, 0 tie) to every node on the path back to the root
//!
//! # Usage
//!
//! ```rust
//! use game_board::{GameState, Side};
//! use mcts::{choose_move, CycleLimit, SearchConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let state = GameState::empty(6, 7, Some((2, 3)), Side::Computer).unwrap();
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//!
//! let mv = choose_move(state, SearchConfig::default(), CycleLimit::new(200), &mut rng).unwrap();
//! assert_eq!(mv.row, 5);
//! ```
//!
//! # Configuration
//!
//! The [`SearchConfig`] struct controls search behavior:
//!
//! - `exploration`: Exploration constant for UCB1 (default: 0.8)
//! - `time_budget`: Wall-clock time per decision (default: 3 seconds)
//! - `max_cycles`: Optional cap on search cycles
//! - `final_choice`: Rule for the recommended move (default: mean value)
//!
//! # Budgets
//!
//! The search loop polls a [`Budget`] between cycles:
//!
//! - [`Deadline`]: Wall-clock limit from a monotonic start instant
//! - [`CycleLimit`]: Fixed number of cycles, for deterministic tests
//! - [`FirstOf`]: Stops when either of two budgets does

pub mod budget;
pub mod config;
pub mod node;
pub mod rollout;
pub mod search;
pub mod tree;

// Re-export main types
pub use budget::{Budget, CycleLimit, Deadline, FirstOf};
pub use config::{FinalChoice, SearchConfig};
pub use node::{NodeId, SearchNode};
pub use rollout::{random_playout, RolloutPolicy, UniformRollout};
pub use search::{
    choose_move, choose_move_with_deadline, choose_point, run_search, SearchEngine, SearchError,
    SearchResult, SearchStats,
};
pub use tree::{ChildSummary, SearchTree, TreeStats};
