//! connect-uct - UCT move chooser for the gravity connection game
//!
//! A command-line front end for the search engine that:
//! 1. Chooses the computer's move for a position read from a board file
//! 2. Plays matches of the engine against a uniformly random opponent
//!
//! Board files use one line per row, top row first: `.` empty, `X` player,
//! `O` computer, `#` the forbidden cell.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use game_board::{GameState, Side};
use mcts::run_search;
use std::path::PathBuf;
use tracing::{info, warn};

mod config;
mod opponent;
mod runner;
mod stats;

use crate::config::{Config, CENTRAL_CONFIG};
use crate::opponent::RandomOpponent;
use crate::runner::MatchRunner;

#[derive(Parser, Debug)]
#[command(name = "connect-uct")]
#[command(version, about = "UCT move chooser for a gravity connection game with a forbidden cell")]
#[command(
    long_about = "Chooses moves with Upper Confidence Trees under a wall-clock budget.

Configuration is loaded from config.toml with environment variable overrides
(CONNECT_UCT_<SECTION>_<KEY>). CLI arguments take highest priority."
)]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Choose the computer's move for a position
    Choose(ChooseArgs),

    /// Play the engine against a random opponent
    Play(PlayArgs),
}

#[derive(Args, Debug)]
struct ChooseArgs {
    /// Board file (`.` empty, `X` player, `O` computer, `#` forbidden)
    #[arg(long)]
    board: PathBuf,

    /// Print the full search result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct PlayArgs {
    /// Number of games to play
    #[arg(long, default_value_t = CENTRAL_CONFIG.matches.games)]
    games: u32,

    /// Whether the engine moves first
    #[arg(long, action = ArgAction::Set, default_value_t = CENTRAL_CONFIG.matches.engine_first)]
    engine_first: bool,

    /// Also write the match summary to this JSON file
    #[arg(long)]
    stats_path: Option<PathBuf>,
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn choose(config: &Config, args: &ChooseArgs) -> Result<()> {
    let text = std::fs::read_to_string(&args.board)
        .with_context(|| format!("Failed to read board file {}", args.board.display()))?;
    let state = GameState::parse(&text, Side::Computer)
        .with_context(|| format!("Invalid board in {}", args.board.display()))?;

    if let Some(pinned) = config.forbidden() {
        if state.geometry().forbidden() != Some(pinned) {
            warn!(
                ?pinned,
                board = ?state.geometry().forbidden(),
                "Board file overrides the configured forbidden cell"
            );
        }
    }

    let search = config.search_config()?;
    let budget = search.budget();
    let mut rng = config.make_rng();
    let result = run_search(state, search, budget, &mut rng).context("Search failed")?;

    info!(
        row = result.mv.row,
        col = result.mv.col,
        cycles = result.stats.cycles,
        cycles_per_sec = format!("{:.0}", result.stats.cycles_per_second()),
        "Move chosen"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{} {}", result.mv.row, result.mv.col);
    }
    Ok(())
}

fn play(config: Config, args: &PlayArgs) -> Result<()> {
    // Opponent gets its own stream so seeded runs stay reproducible.
    let opponent = match config.seed {
        Some(seed) => RandomOpponent::with_seed(seed.wrapping_add(1)),
        None => RandomOpponent::new(),
    };
    let rng = config.make_rng();

    let mut runner = MatchRunner::new(config, opponent, rng)?;
    let snapshot = runner.run(args.games, args.engine_first)?;

    if let Some(ref path) = args.stats_path {
        stats::write_stats(&snapshot, path)
            .with_context(|| format!("Failed to save match stats to {}", path.display()))?;
    }
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn main() -> Result<()> {
    // Parse configuration
    let cli = Cli::parse();
    let config = cli.config.with_central_defaults(&CENTRAL_CONFIG);

    // Validate configuration
    config.validate()?;

    // Initialize tracing
    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    match cli.command {
        Command::Choose(ref args) => choose(&config, args),
        Command::Play(ref args) => play(config, args),
    }
}
