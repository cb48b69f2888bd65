//! Tests for the configuration module.

use super::*;
use tempfile::tempdir;

#[test]
fn test_default_config() {
    let config = CentralConfig::default();
    assert_eq!(config.common.log_level, "info");
    assert_eq!(config.board.rows, 6);
    assert_eq!(config.board.cols, 7);
    assert!(config.board.forbidden().is_none());
    assert!(config.board.random_forbidden);
    assert_eq!(config.matches.games, 20);
    assert!(config.matches.engine_first);
}

#[test]
fn test_search_defaults() {
    let config = CentralConfig::default();
    assert_eq!(config.search.time_budget_ms, 3000);
    assert!((config.search.exploration - 0.8).abs() < f64::EPSILON);
    assert_eq!(config.search.final_choice, "mean_value");
    assert!(config.search.max_cycles.is_none());
    assert!(config.search.seed.is_none());
}

#[test]
fn test_accessors_match_struct_defaults() {
    let config = CentralConfig::default();
    assert_eq!(config.board.rows, rows());
    assert_eq!(config.search.time_budget_ms, time_budget_ms());
    assert_eq!(config.search.final_choice, final_choice());
    assert_eq!(config.matches.games, games());
}

#[test]
fn test_env_overrides() {
    std::env::set_var("CONNECT_UCT_SEARCH_TIME_BUDGET_MS", "250");
    std::env::set_var("CONNECT_UCT_BOARD_FORBIDDEN_ROW", "2");
    std::env::set_var("CONNECT_UCT_BOARD_FORBIDDEN_COL", "5");
    std::env::set_var("CONNECT_UCT_SEARCH_EXPLORATION", "1.5");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.search.time_budget_ms, 250);
    assert_eq!(config.board.forbidden(), Some((2, 5)));
    assert!((config.search.exploration - 1.5).abs() < f64::EPSILON);

    std::env::remove_var("CONNECT_UCT_SEARCH_TIME_BUDGET_MS");
    std::env::remove_var("CONNECT_UCT_BOARD_FORBIDDEN_ROW");
    std::env::remove_var("CONNECT_UCT_BOARD_FORBIDDEN_COL");
    std::env::remove_var("CONNECT_UCT_SEARCH_EXPLORATION");
}

#[test]
fn test_unparseable_env_override_is_ignored() {
    std::env::set_var("CONNECT_UCT_MATCHES_GAMES", "lots");
    std::env::set_var("CONNECT_UCT_MATCHES_ENGINE_FIRST", "false");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.matches.games, 20);
    assert!(!config.matches.engine_first);

    std::env::remove_var("CONNECT_UCT_MATCHES_GAMES");
    std::env::remove_var("CONNECT_UCT_MATCHES_ENGINE_FIRST");
}

#[test]
fn test_parse_config_toml() {
    let toml_content = r#"
[common]
log_level = "debug"

[board]
rows = 8
cols = 9
forbidden_row = 3
forbidden_col = 4

[search]
time_budget_ms = 1000
final_choice = "most_visited"
max_cycles = 5000
seed = 7

[matches]
games = 3
engine_first = false
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.common.log_level, "debug");
    assert_eq!(config.board.rows, 8);
    assert_eq!(config.board.cols, 9);
    assert_eq!(config.board.forbidden(), Some((3, 4)));
    assert_eq!(config.search.time_budget_ms, 1000);
    assert_eq!(config.search.final_choice, "most_visited");
    assert_eq!(config.search.max_cycles, Some(5000));
    assert_eq!(config.search.seed, Some(7));
    assert_eq!(config.matches.games, 3);
    assert!(!config.matches.engine_first);
}

#[test]
fn test_partial_config() {
    let toml_content = r#"
[search]
exploration = 1.2
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert!((config.search.exploration - 1.2).abs() < f64::EPSILON);
    assert_eq!(config.search.time_budget_ms, 3000); // Default
    assert_eq!(config.board.rows, 6); // Default
    assert_eq!(config.matches.games, 20); // Default
}

#[test]
fn test_half_pinned_forbidden_cell_is_unset() {
    let toml_content = r#"
[board]
forbidden_row = 1
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert!(config.board.forbidden().is_none());
}

#[test]
fn test_load_from_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[board]\nrows = 5\n").unwrap();

    let config = load_from_path(&path);
    assert_eq!(config.board.rows, 5);
    assert_eq!(config.board.cols, 7);
}

#[test]
fn test_load_from_bad_path_falls_back() {
    let dir = tempdir().unwrap();
    let config = load_from_path(&dir.path().join("missing.toml"));
    assert_eq!(config.board.rows, 6);
}

#[test]
fn test_load_from_invalid_toml_falls_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[board\nrows = ").unwrap();

    let config = load_from_path(&path);
    assert_eq!(config.board.rows, 6);
}

#[test]
fn test_config_clone() {
    let config = CentralConfig::default();
    let cloned = config.clone();
    assert_eq!(config.common.log_level, cloned.common.log_level);
    assert_eq!(config.search.final_choice, cloned.search.final_choice);
}
