//! Centralized configuration loading from config.toml.
//!
//! This crate provides the configuration structs and loading logic used by
//! the `connect-uct` binary.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`CONNECT_UCT_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml, embedded at compile time)
//!
//! Command-line flags sit above all of these; the binary uses the loaded
//! values as its clap defaults.
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! CONNECT_UCT_<SECTION>_<KEY>=value
//!
//! Examples:
//!     CONNECT_UCT_COMMON_LOG_LEVEL=debug
//!     CONNECT_UCT_BOARD_FORBIDDEN_ROW=2
//!     CONNECT_UCT_SEARCH_TIME_BUDGET_MS=500
//!     CONNECT_UCT_SEARCH_FINAL_CHOICE=most_visited
//!     CONNECT_UCT_MATCHES_GAMES=50
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{
    apply_env_overrides, load_config, load_from_path, CONFIG_PATH_VAR, CONFIG_SEARCH_PATHS,
};
pub use structs::*;

#[cfg(test)]
mod tests;
