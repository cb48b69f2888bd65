//! Default configuration values loaded from config.defaults.toml.
//!
//! The defaults file is embedded at compile time so the binary and the
//! documented defaults can never drift apart.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    board: BoardDefaults,
    search: SearchDefaults,
    matches: MatchDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct BoardDefaults {
    rows: usize,
    cols: usize,
    forbidden_row: Option<usize>,
    forbidden_col: Option<usize>,
    random_forbidden: bool,
}

#[derive(Debug, Deserialize)]
struct SearchDefaults {
    time_budget_ms: u64,
    exploration: f64,
    final_choice: String,
    max_cycles: Option<u64>,
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct MatchDefaults {
    games: u32,
    engine_first: bool,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// Board
pub fn rows() -> usize {
    DEFAULTS.board.rows
}
pub fn cols() -> usize {
    DEFAULTS.board.cols
}
pub fn forbidden_row() -> Option<usize> {
    DEFAULTS.board.forbidden_row
}
pub fn forbidden_col() -> Option<usize> {
    DEFAULTS.board.forbidden_col
}
pub fn random_forbidden() -> bool {
    DEFAULTS.board.random_forbidden
}

// Search
pub fn time_budget_ms() -> u64 {
    DEFAULTS.search.time_budget_ms
}
pub fn exploration() -> f64 {
    DEFAULTS.search.exploration
}
pub fn final_choice() -> &'static str {
    &DEFAULTS.search.final_choice
}
pub fn max_cycles() -> Option<u64> {
    DEFAULTS.search.max_cycles
}
pub fn seed() -> Option<u64> {
    DEFAULTS.search.seed
}

// Matches
pub fn games() -> u32 {
    DEFAULTS.matches.games
}
pub fn engine_first() -> bool {
    DEFAULTS.matches.engine_first
}
