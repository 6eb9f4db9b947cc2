//! Error types.

use derive_more::{Display, Error};
use serde::Serialize;
use tracing::instrument;

/// Board axis named in range errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Axis {
    /// Row axis (letters).
    Row,
    /// Column axis (digits).
    Column,
}

/// Error raised when a move is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum MoveError {
    /// Command text is not exactly two characters long.
    #[display("Invalid command {:?}: expected 2 characters, got {}", command, length)]
    InvalidCommandFormat {
        /// Raw command text.
        command: String,
        /// Number of characters received.
        length: usize,
    },

    /// First character is not a letter.
    #[display("Invalid row character: {:?}", _0)]
    InvalidRowCharacter(char),

    /// Second character is not a decimal digit.
    #[display("Invalid column character: {:?}", _0)]
    InvalidColumnCharacter(char),

    /// Decoded coordinate lies outside the current board.
    #[display("{} index out of range: {}", axis, index)]
    CellOutOfRange {
        /// Which coordinate is out of range.
        axis: Axis,
        /// Decoded, zero-based index.
        index: isize,
    },

    /// Target cell already belongs to a player.
    #[display("Cell is already taken: ({}, {})", row, col)]
    CellAlreadyOccupied {
        /// Row of the cell.
        row: usize,
        /// Column of the cell.
        col: usize,
    },

    /// The roster is empty.
    #[display("No players set. Please set players first.")]
    NoPlayersConfigured,
}

impl std::error::Error for MoveError {}

/// Configuration error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
