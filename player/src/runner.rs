//! Match runner - plays the engine against a random opponent
//!
//! Every game starts from an empty board. The engine plays the computer side
//! and searches each of its moves under the configured budget; the opponent
//! plays the player side.

use anyhow::{Context, Result};
use game_board::{GameState, Side};
use indicatif::{ProgressBar, ProgressStyle};
use mcts::{run_search, SearchConfig};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info};

use crate::config::Config;
use crate::opponent::Opponent;
use crate::stats::{GameRecord, MatchStats, MatchStatsSnapshot};

pub struct MatchRunner<O: Opponent> {
    config: Config,
    search: SearchConfig,
    opponent: O,
    rng: ChaCha20Rng,
}

impl<O: Opponent> MatchRunner<O> {
    pub fn new(config: Config, opponent: O, rng: ChaCha20Rng) -> Result<Self> {
        let search = config.search_config()?;
        Ok(Self {
            config,
            search,
            opponent,
            rng,
        })
    }

    /// Forbidden cell for the next game: the pinned one, a random one, or
    /// none.
    fn next_forbidden(&mut self) -> Option<(usize, usize)> {
        if let Some(cell) = self.config.forbidden() {
            return Some(cell);
        }
        if self.config.random_forbidden {
            let row = self.rng.gen_range(0..self.config.rows);
            let col = self.rng.gen_range(0..self.config.cols);
            return Some((row, col));
        }
        None
    }

    /// Play one game to completion.
    pub fn play_game(&mut self, engine_first: bool) -> Result<GameRecord> {
        let forbidden = self.next_forbidden();
        let first = if engine_first {
            Side::Computer
        } else {
            Side::Player
        };
        let mut state = GameState::empty(self.config.rows, self.config.cols, forbidden, first)
            .context("Failed to create starting position")?;

        let mut moves = 0u32;
        let mut engine_moves = 0u32;
        let mut engine_cycles = 0u64;

        while !state.outcome().is_terminal() {
            let column = match state.to_move() {
                Side::Computer => {
                    let result = run_search(
                        state.clone(),
                        self.search.clone(),
                        self.search.budget(),
                        &mut self.rng,
                    )
                    .context("Engine search failed")?;
                    engine_moves += 1;
                    engine_cycles += result.stats.cycles;
                    result.mv.col
                }
                Side::Player => self.opponent.select_column(&state)?,
            };

            let mv = state.apply_move(column);
            moves += 1;
            debug!(
                move_number = moves,
                row = mv.row,
                col = mv.col,
                side = ?state.mover(),
                "Move played"
            );
        }

        Ok(GameRecord {
            forbidden,
            engine_first,
            moves,
            engine_moves,
            engine_cycles,
            outcome: state.outcome(),
        })
    }

    /// Play `games` games and return the aggregated statistics.
    pub fn run(&mut self, games: u32, engine_first: bool) -> Result<MatchStatsSnapshot> {
        info!(
            games,
            engine_first,
            time_budget_ms = self.config.time_budget_ms,
            max_cycles = ?self.config.max_cycles,
            "Starting match against random opponent"
        );

        // Progress bar only when stderr is a TTY
        let progress = if games > 0 && std::io::IsTerminal::is_terminal(&std::io::stderr()) {
            let pb = ProgressBar::new(games as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} games ({eta})")
                    .context("Invalid progress bar template")?
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        let mut stats = MatchStats::new();
        for game_index in 1..=games {
            let record = self
                .play_game(engine_first)
                .with_context(|| format!("Game {} failed", game_index))?;

            debug!(
                game = game_index,
                outcome = ?record.outcome,
                moves = record.moves,
                forbidden = ?record.forbidden,
                "Game completed"
            );
            stats.record_game(&record);

            if let Some(ref pb) = progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = progress {
            pb.finish_with_message("done");
        }

        let snapshot = stats.snapshot();
        info!(
            engine_wins = snapshot.engine_wins,
            random_wins = snapshot.random_wins,
            ties = snapshot.ties,
            avg_cycles_per_move = format!("{:.0}", snapshot.avg_cycles_per_move),
            "Match finished"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opponent::RandomOpponent;
    use game_board::Outcome;
    use rand::SeedableRng;

    fn fast_config() -> Config {
        Config {
            log_level: "info".into(),
            rows: 6,
            cols: 7,
            forbidden_row: None,
            forbidden_col: None,
            random_forbidden: true,
            time_budget_ms: 10_000,
            exploration: 0.8,
            final_choice: "mean_value".into(),
            max_cycles: Some(300),
            seed: Some(1),
        }
    }

    fn runner(config: Config) -> MatchRunner<RandomOpponent> {
        MatchRunner::new(
            config,
            RandomOpponent::with_seed(2),
            ChaCha20Rng::seed_from_u64(3),
        )
        .unwrap()
    }

    #[test]
    fn test_game_runs_to_completion() {
        let mut runner = runner(fast_config());
        let record = runner.play_game(true).unwrap();

        assert!(record.outcome.is_terminal());
        assert!(record.moves >= 7);
        assert!(record.moves <= 41);
        // Engine moved first, so it made half the moves rounded up.
        assert_eq!(record.engine_moves, record.moves.div_ceil(2));
        assert_eq!(record.engine_cycles, 300 * record.engine_moves as u64);
        assert!(record.forbidden.is_some());
    }

    #[test]
    fn test_opponent_first() {
        let mut runner = runner(fast_config());
        let record = runner.play_game(false).unwrap();
        assert_eq!(record.engine_moves, record.moves / 2);
    }

    #[test]
    fn test_pinned_forbidden_cell() {
        let mut config = fast_config();
        config.forbidden_row = Some(5);
        config.forbidden_col = Some(0);
        let mut runner = runner(config);

        for _ in 0..3 {
            let record = runner.play_game(true).unwrap();
            assert_eq!(record.forbidden, Some((5, 0)));
        }
    }

    #[test]
    fn test_no_forbidden_cell() {
        let mut config = fast_config();
        config.random_forbidden = false;
        let mut runner = runner(config);
        let record = runner.play_game(true).unwrap();
        assert!(record.forbidden.is_none());
        assert!(record.moves <= 42);
    }

    #[test]
    fn test_engine_beats_random_opponent() {
        let mut runner = runner(fast_config());
        let snapshot = runner.run(6, true).unwrap();

        assert_eq!(snapshot.games_completed, 6);
        assert_eq!(
            snapshot.engine_wins + snapshot.random_wins + snapshot.ties,
            6
        );
        assert!(snapshot.engine_wins >= 4, "engine won {}/6", snapshot.engine_wins);
    }

    #[test]
    fn test_record_outcome_is_final() {
        let mut runner = runner(fast_config());
        let record = runner.play_game(true).unwrap();
        assert_ne!(record.outcome, Outcome::Ongoing);
    }
}
