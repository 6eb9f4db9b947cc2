//! Initial match configuration.

use crate::error::ConfigError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Settings a service starts from.
///
/// Values below the engine's minimums are clamped when applied, the same way
/// the runtime setters clamp.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    /// Board rows.
    #[serde(default = "default_dimension")]
    rows: usize,

    /// Board columns.
    #[serde(default = "default_dimension")]
    cols: usize,

    /// Run length needed to win.
    #[serde(default = "default_win_threshold")]
    win_threshold: usize,

    /// Number of players.
    #[serde(default = "default_players")]
    players: usize,

    /// Whether state reads are memoized.
    #[serde(default = "default_cache_enabled")]
    cache_enabled: bool,
}

fn default_dimension() -> usize {
    3
}

fn default_win_threshold() -> usize {
    3
}

fn default_players() -> usize {
    2
}

fn default_cache_enabled() -> bool {
    true
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: default_dimension(),
            cols: default_dimension(),
            win_threshold: default_win_threshold(),
            players: default_players(),
            cache_enabled: default_cache_enabled(),
        }
    }
}

impl GameConfig {
    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(
            rows = config.rows,
            cols = config.cols,
            players = config.players,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Overrides the board dimensions.
    pub fn with_size(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    /// Overrides the number of rows.
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    /// Overrides the number of columns.
    pub fn with_cols(mut self, cols: usize) -> Self {
        self.cols = cols;
        self
    }

    /// Overrides the win threshold.
    pub fn with_win_threshold(mut self, win_threshold: usize) -> Self {
        self.win_threshold = win_threshold;
        self
    }

    /// Overrides the player count.
    pub fn with_players(mut self, players: usize) -> Self {
        self.players = players;
        self
    }

    /// Turns state caching on or off.
    pub fn with_cache_enabled(mut self, cache_enabled: bool) -> Self {
        self.cache_enabled = cache_enabled;
        self
    }
}
