//! Match statistics tracking and persistence.
//!
//! This module tracks the results of engine-versus-random matches:
//! - Game counts and outcomes
//! - Search performance per engine move
//! - Game length and timing
//!
//! A snapshot can be written to a JSON file for later comparison.

use anyhow::{Context, Result};
use game_board::Outcome;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};

/// Result of a single game, as reported by the match runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    /// Forbidden cell used for this game
    pub forbidden: Option<(usize, usize)>,
    /// Whether the engine made the first move
    pub engine_first: bool,
    /// Total moves by both sides
    pub moves: u32,
    /// Moves chosen by the engine
    pub engine_moves: u32,
    /// Search cycles summed over the engine's moves
    pub engine_cycles: u64,
    /// Final outcome, computer = engine
    pub outcome: Outcome,
}

/// Aggregated match statistics.
#[derive(Debug)]
pub struct MatchStats {
    games_completed: u32,
    engine_wins: u32,
    random_wins: u32,
    ties: u32,
    total_moves: u64,
    engine_moves: u64,
    engine_cycles: u64,
    start_time: Instant,
}

/// Serializable stats for JSON output.
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchStatsSnapshot {
    pub games_completed: u32,
    pub engine_wins: u32,
    pub random_wins: u32,
    pub ties: u32,
    pub engine_win_rate: f64,
    pub avg_game_length: f64,
    pub avg_cycles_per_move: f64,
    pub runtime_seconds: f64,
    pub timestamp: u64,
}

impl MatchStats {
    /// Create new stats tracker.
    pub fn new() -> Self {
        Self {
            games_completed: 0,
            engine_wins: 0,
            random_wins: 0,
            ties: 0,
            total_moves: 0,
            engine_moves: 0,
            engine_cycles: 0,
            start_time: Instant::now(),
        }
    }

    /// Record a completed game.
    pub fn record_game(&mut self, game: &GameRecord) {
        self.games_completed += 1;
        self.total_moves += game.moves as u64;
        self.engine_moves += game.engine_moves as u64;
        self.engine_cycles += game.engine_cycles;

        match game.outcome {
            Outcome::ComputerWin => self.engine_wins += 1,
            Outcome::PlayerWin => self.random_wins += 1,
            Outcome::Tie => self.ties += 1,
            Outcome::Ongoing => warn!("Recorded a game that never finished"),
        }
    }

    /// Get a snapshot of current stats.
    pub fn snapshot(&self) -> MatchStatsSnapshot {
        let games = self.games_completed;
        let runtime = self.start_time.elapsed().as_secs_f64();

        let engine_win_rate = if games > 0 {
            self.engine_wins as f64 / games as f64
        } else {
            0.0
        };

        let avg_game_length = if games > 0 {
            self.total_moves as f64 / games as f64
        } else {
            0.0
        };

        let avg_cycles_per_move = if self.engine_moves > 0 {
            self.engine_cycles as f64 / self.engine_moves as f64
        } else {
            0.0
        };

        MatchStatsSnapshot {
            games_completed: games,
            engine_wins: self.engine_wins,
            random_wins: self.random_wins,
            ties: self.ties,
            engine_win_rate,
            avg_game_length,
            avg_cycles_per_move,
            runtime_seconds: runtime,
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }
}

impl Default for MatchStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Write a snapshot to a JSON file (atomic write-then-rename).
pub fn write_stats(snapshot: &MatchStatsSnapshot, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot).context("Failed to serialize match stats")?;

    // Write to temp file then rename (atomic on most filesystems)
    let mut temp_path = PathBuf::from(path);
    temp_path.set_extension("json.tmp");
    let mut file = fs::File::create(&temp_path)
        .with_context(|| format!("Failed to create temp stats file {}", temp_path.display()))?;
    file.write_all(json.as_bytes())
        .with_context(|| format!("Failed to write match stats to {}", temp_path.display()))?;
    drop(file);

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e).with_context(|| format!("Failed to rename stats file to {}", path.display()));
    }

    debug!("Wrote match stats to {}", path.display());
    Ok(())
}
