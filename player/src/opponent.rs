//! Move selection for the engine's sparring partner

use anyhow::{anyhow, Result};
use game_board::GameState;
use rand::prelude::*;
use rand_chacha::ChaCha20Rng;

/// Trait for column selection policies.
pub trait Opponent {
    /// Select a column to play in `state`.
    fn select_column(&mut self, state: &GameState) -> Result<usize>;
}

/// Opponent that plays a uniformly random legal column.
#[derive(Debug)]
pub struct RandomOpponent {
    rng: ChaCha20Rng,
}

impl RandomOpponent {
    pub fn new() -> Self {
        let rng = ChaCha20Rng::from_entropy();
        Self { rng }
    }

    pub fn with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        Self { rng }
    }
}

impl Opponent for RandomOpponent {
    fn select_column(&mut self, state: &GameState) -> Result<usize> {
        state
            .legal_columns()
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| anyhow!("no legal column to play"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_board::Side;

    #[test]
    fn test_random_opponent_plays_legal_columns() {
        let mut state = GameState::empty(2, 3, None, Side::Player).unwrap();
        state.apply_move(0);
        state.apply_move(0);

        let mut opponent = RandomOpponent::with_seed(3);
        for _ in 0..50 {
            let col = opponent.select_column(&state).unwrap();
            assert!(col == 1 || col == 2);
        }
    }

    #[test]
    fn test_random_opponent_full_board_errors() {
        let mut state = GameState::empty(1, 2, None, Side::Player).unwrap();
        state.apply_move(0);
        state.apply_move(1);

        let mut opponent = RandomOpponent::new();
        assert!(opponent.select_column(&state).is_err());
    }

    #[test]
    fn test_seeded_opponent_is_reproducible() {
        let state = GameState::empty(6, 7, None, Side::Player).unwrap();
        let mut a = RandomOpponent::with_seed(11);
        let mut b = RandomOpponent::with_seed(11);
        for _ in 0..10 {
            assert_eq!(
                a.select_column(&state).unwrap(),
                b.select_column(&state).unwrap()
            );
        }
    }
}
