//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::{Deserialize, Serialize};

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_rows() -> usize {
    defaults::rows()
}
fn d_cols() -> usize {
    defaults::cols()
}
fn d_forbidden_row() -> Option<usize> {
    defaults::forbidden_row()
}
fn d_forbidden_col() -> Option<usize> {
    defaults::forbidden_col()
}
fn d_random_forbidden() -> bool {
    defaults::random_forbidden()
}
fn d_time_budget_ms() -> u64 {
    defaults::time_budget_ms()
}
fn d_exploration() -> f64 {
    defaults::exploration()
}
fn d_final_choice() -> String {
    defaults::final_choice().into()
}
fn d_max_cycles() -> Option<u64> {
    defaults::max_cycles()
}
fn d_seed() -> Option<u64> {
    defaults::seed()
}
fn d_games() -> u32 {
    defaults::games()
}
fn d_engine_first() -> bool {
    defaults::engine_first()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub matches: MatchConfig,
}

/// Settings shared by every command
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
        }
    }
}

/// Board geometry
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct BoardConfig {
    #[serde(default = "d_rows")]
    pub rows: usize,
    #[serde(default = "d_cols")]
    pub cols: usize,
    #[serde(default = "d_forbidden_row")]
    pub forbidden_row: Option<usize>,
    #[serde(default = "d_forbidden_col")]
    pub forbidden_col: Option<usize>,
    /// Draw a random forbidden cell per game when none is pinned.
    #[serde(default = "d_random_forbidden")]
    pub random_forbidden: bool,
}

impl BoardConfig {
    /// The pinned forbidden cell, if both coordinates are set.
    pub fn forbidden(&self) -> Option<(usize, usize)> {
        self.forbidden_row.zip(self.forbidden_col)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: defaults::rows(),
            cols: defaults::cols(),
            forbidden_row: defaults::forbidden_row(),
            forbidden_col: defaults::forbidden_col(),
            random_forbidden: defaults::random_forbidden(),
        }
    }
}

/// Move search settings
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SearchSettings {
    #[serde(default = "d_time_budget_ms")]
    pub time_budget_ms: u64,
    #[serde(default = "d_exploration")]
    pub exploration: f64,
    /// One of `mean_value`, `ucb`, `most_visited`
    #[serde(default = "d_final_choice")]
    pub final_choice: String,
    #[serde(default = "d_max_cycles")]
    pub max_cycles: Option<u64>,
    #[serde(default = "d_seed")]
    pub seed: Option<u64>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            time_budget_ms: defaults::time_budget_ms(),
            exploration: defaults::exploration(),
            final_choice: defaults::final_choice().into(),
            max_cycles: defaults::max_cycles(),
            seed: defaults::seed(),
        }
    }
}

/// Engine-versus-random match settings
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct MatchConfig {
    #[serde(default = "d_games")]
    pub games: u32,
    /// Whether the engine moves first in every game.
    #[serde(default = "d_engine_first")]
    pub engine_first: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            games: defaults::games(),
            engine_first: defaults::engine_first(),
        }
    }
}
