//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::Path;
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_VAR: &str = "CONNECT_UCT_CONFIG";

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from subdirectory)
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by CONNECT_UCT_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var(CONFIG_PATH_VAR) {
        let path = Path::new(&path);
        if path.exists() {
            info!("Loading config from {}: {}", CONFIG_PATH_VAR, path.display());
            return load_from_path(path);
        }
        warn!(
            "{}={} not found, searching defaults",
            CONFIG_PATH_VAR,
            path.display()
        );
    }

    // Search default locations
    for path_str in CONFIG_SEARCH_PATHS {
        let path = Path::new(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(path);
        }
    }

    // Fall back to defaults
    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (usize, u64, f64, bool, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = v;
        }
    };
    // Optional parseable field (Option<usize>, Option<u64>, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, optional_parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = Some(v);
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: CONNECT_UCT_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "CONNECT_UCT_COMMON_LOG_LEVEL");

    // Board
    env_override!(config, board.rows, "CONNECT_UCT_BOARD_ROWS", parse);
    env_override!(config, board.cols, "CONNECT_UCT_BOARD_COLS", parse);
    env_override!(
        config,
        board.forbidden_row,
        "CONNECT_UCT_BOARD_FORBIDDEN_ROW",
        optional_parse
    );
    env_override!(
        config,
        board.forbidden_col,
        "CONNECT_UCT_BOARD_FORBIDDEN_COL",
        optional_parse
    );
    env_override!(
        config,
        board.random_forbidden,
        "CONNECT_UCT_BOARD_RANDOM_FORBIDDEN",
        parse
    );

    // Search
    env_override!(
        config,
        search.time_budget_ms,
        "CONNECT_UCT_SEARCH_TIME_BUDGET_MS",
        parse
    );
    env_override!(
        config,
        search.exploration,
        "CONNECT_UCT_SEARCH_EXPLORATION",
        parse
    );
    env_override!(
        config,
        search.final_choice,
        "CONNECT_UCT_SEARCH_FINAL_CHOICE"
    );
    env_override!(
        config,
        search.max_cycles,
        "CONNECT_UCT_SEARCH_MAX_CYCLES",
        optional_parse
    );
    env_override!(config, search.seed, "CONNECT_UCT_SEARCH_SEED", optional_parse);

    // Matches
    env_override!(config, matches.games, "CONNECT_UCT_MATCHES_GAMES", parse);
    env_override!(
        config,
        matches.engine_first,
        "CONNECT_UCT_MATCHES_ENGINE_FIRST",
        parse
    );

    config
}
