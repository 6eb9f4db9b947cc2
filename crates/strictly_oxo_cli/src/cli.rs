//! Command-line interface for the oxo binary.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use strictly_oxo::{ConfigError, GameConfig};
use tracing::{debug, instrument};

/// Strictly OXO - generalized tic-tac-toe
#[derive(Parser, Debug)]
#[command(name = "oxo")]
#[command(about = "Play generalized tic-tac-toe from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Match settings
    #[command(flatten)]
    pub settings: Settings,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively, reading commands from stdin
    Play,

    /// Apply moves in order and print the final state as JSON
    Replay {
        /// Moves such as a1 b2 c3
        moves: Vec<String>,
    },
}

/// Match settings: a config file plus per-field overrides.
#[derive(Args, Debug, Default)]
pub struct Settings {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Board rows (minimum 3)
    #[arg(long, global = true)]
    pub rows: Option<usize>,

    /// Board columns (minimum 3)
    #[arg(long, global = true)]
    pub cols: Option<usize>,

    /// Number of players
    #[arg(short, long, global = true)]
    pub players: Option<usize>,

    /// Run length needed to win
    #[arg(short, long, global = true)]
    pub threshold: Option<usize>,

    /// Disable the state cache
    #[arg(long, global = true)]
    pub no_cache: bool,
}

impl Settings {
    /// Loads the config file, if any, and applies the overrides.
    #[instrument(skip(self))]
    pub fn resolve(&self) -> Result<GameConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };
        if let Some(rows) = self.rows {
            config = config.with_rows(rows);
        }
        if let Some(cols) = self.cols {
            config = config.with_cols(cols);
        }
        if let Some(players) = self.players {
            config = config.with_players(players);
        }
        if let Some(threshold) = self.threshold {
            config = config.with_win_threshold(threshold);
        }
        if self.no_cache {
            config = config.with_cache_enabled(false);
        }
        debug!(?config, "Resolved settings");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply_on_defaults() {
        let cli = Cli::parse_from(["oxo", "--rows", "7", "-t", "4", "--no-cache", "play"]);
        let config = cli.settings.resolve().unwrap();
        assert_eq!(*config.rows(), 7);
        assert_eq!(*config.cols(), 3);
        assert_eq!(*config.win_threshold(), 4);
        assert!(!*config.cache_enabled());
        assert!(matches!(cli.command, Command::Play));
    }

    #[test]
    fn test_replay_collects_moves() {
        let cli = Cli::parse_from(["oxo", "replay", "a1", "b2", "--players", "3"]);
        match cli.command {
            Command::Replay { moves } => assert_eq!(moves, ["a1", "b2"]),
            Command::Play => panic!("Expected replay"),
        }
        assert_eq!(cli.settings.players, Some(3));
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let settings = Settings {
            config: Some(PathBuf::from("/nonexistent/oxo.toml")),
            ..Settings::default()
        };
        assert!(settings.resolve().is_err());
    }
}
