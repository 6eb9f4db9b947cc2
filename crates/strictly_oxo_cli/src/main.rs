//! Strictly OXO - terminal front end
//!
//! Drives a [`GameService`] from the command line, either interactively or
//! by replaying a list of moves.

#![warn(missing_docs)]

mod cli;
mod repl;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use strictly_oxo::GameService;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.settings.resolve()?;
    info!(?config, "Starting strictly_oxo");
    let service = GameService::new(&config);

    match cli.command {
        Command::Play => run_play(&service),
        Command::Replay { moves } => run_replay(&service, &moves),
    }
}

/// Run the interactive session on stdin/stdout
fn run_play(service: &GameService) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    repl::run(service, stdin.lock(), stdout.lock())
}

/// Apply every move, then print state and cache stats as JSON
#[instrument(skip(service))]
fn run_replay(service: &GameService, moves: &[String]) -> Result<()> {
    for (index, command) in moves.iter().enumerate() {
        if let Err(e) = service.apply_move(command) {
            warn!(index, %command, error = %e, "Skipping rejected move");
        }
    }
    let report = serde_json::json!({
        "state": *service.get_state(),
        "cacheStats": service.cache_stats(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
