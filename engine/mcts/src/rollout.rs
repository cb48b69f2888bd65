//! Rollout (default) policies.
//!
//! A rollout plays a position out to the end and reports the terminal value,
//! which the search uses as a one-sample estimate of the position's worth.

use game_board::{GameState, Outcome};
use rand::Rng;
use rand_chacha::ChaCha20Rng;

/// Trait for rollout policies.
///
/// Implementations return the terminal value from the computer's perspective:
/// +1 computer win, -1 player win, 0 tie.
pub trait RolloutPolicy {
    fn rollout(&self, state: &GameState, rng: &mut ChaCha20Rng) -> f64;
}

/// Plays uniformly random legal columns for both sides until the game ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformRollout;

impl UniformRollout {
    pub fn new() -> Self {
        Self
    }
}

impl RolloutPolicy for UniformRollout {
    fn rollout(&self, state: &GameState, rng: &mut ChaCha20Rng) -> f64 {
        // The state's own move may already have decided the game.
        let mut outcome = state.outcome();
        if let Some(value) = outcome.value() {
            return value;
        }

        let mut sim = state.clone();
        loop {
            let column = random_legal_column(sim.heights(), rng);
            sim.apply_move(column);
            outcome = sim.outcome();
            if let Some(value) = outcome.value() {
                return value;
            }
        }
    }
}

/// Pick a uniformly random column with room by rejection sampling.
///
/// Requires at least one legal column, which holds for any state whose
/// outcome is `Ongoing`.
fn random_legal_column(heights: &[usize], rng: &mut ChaCha20Rng) -> usize {
    debug_assert!(heights.iter().any(|&h| h > 0), "no legal column to roll out");
    loop {
        let column = rng.gen_range(0..heights.len());
        if heights[column] > 0 {
            return column;
        }
    }
}

/// Outcome of a full random playout, for tests and diagnostics.
pub fn random_playout(state: &GameState, rng: &mut ChaCha20Rng) -> Outcome {
    let mut sim = state.clone();
    while !sim.outcome().is_terminal() {
        let column = random_legal_column(sim.heights(), rng);
        sim.apply_move(column);
    }
    sim.outcome()
}
