//! Configuration for the player
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Result};
use clap::{ArgAction, Args};
use engine_config::{load_config, CentralConfig};
use game_board::Geometry;
use mcts::{FinalChoice, SearchConfig};
use once_cell::sync::Lazy;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::level_filters::LevelFilter;

// Load central config once at startup
pub static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_rows() -> usize {
    CENTRAL_CONFIG.board.rows
}

fn default_cols() -> usize {
    CENTRAL_CONFIG.board.cols
}

fn default_random_forbidden() -> bool {
    CENTRAL_CONFIG.board.random_forbidden
}

fn default_time_budget_ms() -> u64 {
    CENTRAL_CONFIG.search.time_budget_ms
}

fn default_exploration() -> f64 {
    CENTRAL_CONFIG.search.exploration
}

fn default_final_choice() -> String {
    CENTRAL_CONFIG.search.final_choice.clone()
}

/// Settings shared by every subcommand.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value_t = default_log_level())]
    pub log_level: String,

    /// Board rows
    #[arg(long, global = true, default_value_t = default_rows())]
    pub rows: usize,

    /// Board columns
    #[arg(long, global = true, default_value_t = default_cols())]
    pub cols: usize,

    /// Row of a pinned forbidden cell (row 0 is the top)
    #[arg(long, global = true)]
    pub forbidden_row: Option<usize>,

    /// Column of a pinned forbidden cell
    #[arg(long, global = true)]
    pub forbidden_col: Option<usize>,

    /// Draw a random forbidden cell per game when none is pinned
    #[arg(long, global = true, action = ArgAction::Set, default_value_t = default_random_forbidden())]
    pub random_forbidden: bool,

    /// Wall-clock time per move in milliseconds
    #[arg(long, global = true, default_value_t = default_time_budget_ms())]
    pub time_budget_ms: u64,

    /// UCB1 exploration constant
    #[arg(long, global = true, default_value_t = default_exploration())]
    pub exploration: f64,

    /// Rule for the recommended move (mean_value, ucb, most_visited)
    #[arg(long, global = true, default_value_t = default_final_choice())]
    pub final_choice: String,

    /// Optional cap on search cycles per move
    #[arg(long, global = true)]
    pub max_cycles: Option<u64>,

    /// RNG seed for reproducible runs (entropy when unset)
    #[arg(long, global = true)]
    pub seed: Option<u64>,
}

impl Config {
    /// Fill optional settings the command line left unset from the central
    /// config. Flags without a clap default cannot read it directly.
    /// The forbidden cell falls back as a pair and only when neither
    /// coordinate was given on the command line.
    pub fn with_central_defaults(mut self, central: &CentralConfig) -> Self {
        if self.forbidden_row.is_none() && self.forbidden_col.is_none() {
            if let Some((row, col)) = central.board.forbidden() {
                self.forbidden_row = Some(row);
                self.forbidden_col = Some(col);
            }
        }
        self.max_cycles = self.max_cycles.or(central.search.max_cycles);
        self.seed = self.seed.or(central.search.seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.forbidden_row.is_some() != self.forbidden_col.is_some() {
            return Err(anyhow!(
                "forbidden_row and forbidden_col must be set together"
            ));
        }

        Geometry::new(self.rows, self.cols, self.forbidden())
            .map_err(|e| anyhow!("invalid board: {}", e))?;

        if self.time_budget_ms == 0 {
            return Err(anyhow!("time_budget_ms must be greater than 0"));
        }

        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(anyhow!(
                "exploration must be a non-negative number, got {}",
                self.exploration
            ));
        }

        self.final_choice()?;

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    /// The pinned forbidden cell, if both coordinates are set.
    pub fn forbidden(&self) -> Option<(usize, usize)> {
        self.forbidden_row.zip(self.forbidden_col)
    }

    pub fn final_choice(&self) -> Result<FinalChoice> {
        self.final_choice.parse().map_err(|e: String| anyhow!(e))
    }

    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }

    /// Search parameters for one move decision.
    pub fn search_config(&self) -> Result<SearchConfig> {
        let mut config = SearchConfig::default()
            .with_exploration(self.exploration)
            .with_time_budget(self.time_budget())
            .with_final_choice(self.final_choice()?);
        if let Some(cycles) = self.max_cycles {
            config = config.with_max_cycles(cycles);
        }
        Ok(config)
    }

    /// Create the process RNG: seeded when a seed is configured, from
    /// entropy otherwise.
    pub fn make_rng(&self) -> ChaCha20Rng {
        match self.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        }
    }
}
