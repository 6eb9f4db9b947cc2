//! Display-ready snapshot of a match.

use derive_getters::Getters;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Marker drawn for an empty cell.
pub const EMPTY_MARKER: char = ' ';

/// Immutable view of the board and match state, as handed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    /// Number of rows.
    rows: usize,
    /// Number of columns.
    cols: usize,
    /// Run length needed to win.
    win_threshold: usize,
    /// Number of players in the roster.
    player_count: usize,
    /// Marker of the player to move, if any.
    current_player: Option<char>,
    /// Marker of the winner, if the match is won.
    winner: Option<char>,
    /// Whether the match ended in a draw.
    drawn: bool,
    /// Cell markers, row-major; [`EMPTY_MARKER`] for empty cells.
    board: Vec<Vec<char>>,
}

impl Projection {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        rows: usize,
        cols: usize,
        win_threshold: usize,
        player_count: usize,
        current_player: Option<char>,
        winner: Option<char>,
        drawn: bool,
        board: Vec<Vec<char>>,
    ) -> Self {
        Self {
            rows,
            cols,
            win_threshold,
            player_count,
            current_player,
            winner,
            drawn,
            board,
        }
    }

    /// Marker at `(row, col)`, if in bounds.
    pub fn marker_at(&self, row: usize, col: usize) -> Option<char> {
        self.board.get(row).and_then(|r| r.get(col)).copied()
    }

    /// True once the match is won or drawn.
    pub fn is_finished(&self) -> bool {
        self.winner.is_some() || self.drawn
    }
}

/// Renders the board with row letters and column numbers, followed by a status line.
impl std::fmt::Display for Projection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "   ")?;
        for col in 1..=self.cols {
            write!(f, " {col:>2}")?;
        }
        writeln!(f)?;
        for (i, row) in self.board.iter().enumerate() {
            let label = crate::player::marker_for(i).to_ascii_lowercase();
            write!(f, " {label} ")?;
            for marker in row {
                let shown = if *marker == EMPTY_MARKER { '.' } else { *marker };
                write!(f, "  {shown}")?;
            }
            writeln!(f)?;
        }
        match (self.winner, self.drawn, self.current_player) {
            (Some(w), _, _) => write!(f, "Winner: {w}"),
            (None, true, _) => write!(f, "Drawn"),
            (None, false, Some(p)) => write!(f, "To move: {p}"),
            (None, false, None) => write!(f, "No players"),
        }
    }
}
