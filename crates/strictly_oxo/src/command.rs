//! Decoding of textual move commands such as `"b2"`.
//!
//! A command is exactly two characters: a case-insensitive letter naming the
//! row (`a` is the first row) followed by a decimal digit naming the column
//! (`1` is the first column).

use crate::board::Board;
use crate::error::{Axis, MoveError};
use tracing::instrument;

/// A decoded command, not yet checked against any board.
///
/// Indices are signed because the digit `0` decodes to column `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    row: isize,
    col: isize,
}

impl Command {
    /// Parses command text.
    ///
    /// # Errors
    ///
    /// - [`MoveError::InvalidCommandFormat`] unless the text is two characters.
    /// - [`MoveError::InvalidRowCharacter`] if the first is not an ASCII letter.
    /// - [`MoveError::InvalidColumnCharacter`] if the second is not a digit.
    #[instrument]
    pub fn parse(text: &str) -> Result<Self, MoveError> {
        let mut chars = text.chars();
        let (Some(row_char), Some(col_char), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(MoveError::InvalidCommandFormat {
                command: text.to_string(),
                length: text.chars().count(),
            });
        };

        let row_char = row_char.to_ascii_lowercase();
        if !row_char.is_ascii_lowercase() {
            return Err(MoveError::InvalidRowCharacter(row_char));
        }
        let row = (row_char as u8 - b'a') as isize;

        let col = col_char
            .to_digit(10)
            .ok_or(MoveError::InvalidColumnCharacter(col_char))? as isize
            - 1;

        Ok(Self { row, col })
    }

    /// Wraps already-decoded coordinates.
    pub fn at(row: usize, col: usize) -> Self {
        Self {
            row: isize::try_from(row).unwrap_or(isize::MAX),
            col: isize::try_from(col).unwrap_or(isize::MAX),
        }
    }

    /// Decoded row index.
    pub fn row(&self) -> isize {
        self.row
    }

    /// Decoded column index.
    pub fn col(&self) -> isize {
        self.col
    }

    /// Checks the command against `board`, returning in-bounds coordinates.
    ///
    /// The row is checked before the column.
    pub fn resolve(&self, board: &Board) -> Result<(usize, usize), MoveError> {
        let row = usize::try_from(self.row)
            .ok()
            .filter(|r| *r < board.rows())
            .ok_or(MoveError::CellOutOfRange {
                axis: Axis::Row,
                index: self.row,
            })?;
        let col = usize::try_from(self.col)
            .ok()
            .filter(|c| *c < board.cols())
            .ok_or(MoveError::CellOutOfRange {
                axis: Axis::Column,
                index: self.col,
            })?;
        Ok((row, col))
    }
}
