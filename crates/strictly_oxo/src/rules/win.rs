//! Win detection.
//!
//! Two interchangeable detectors share the [`WinDetector`] trait:
//! [`LineWinDetector`] inspects only the cells near the last move, while
//! [`ScanWinDetector`] walks each full line through it. Both return the same
//! answer for every board; the scan exists as a reference and for comparing
//! costs.

use crate::board::{Board, PlayerId};
use strum::IntoEnumIterator;
use tracing::{instrument, trace};

/// Line orientation through a cell, in checking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
pub enum Orientation {
    /// Along a row.
    Horizontal,
    /// Along a column.
    Vertical,
    /// Top-left to bottom-right.
    MainDiagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

impl Orientation {
    /// Unit step `(Δrow, Δcol)` in the positive direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
            Orientation::MainDiagonal => (1, 1),
            Orientation::AntiDiagonal => (1, -1),
        }
    }
}

/// Decides whether the last placement won the match.
pub trait WinDetector: std::fmt::Debug + Send + Sync {
    /// Returns true iff a same-owner run of at least `win_threshold` cells
    /// passes through `(last_row, last_col)` along some orientation.
    fn check_win(
        &self,
        board: &Board,
        last_row: usize,
        last_col: usize,
        mover: PlayerId,
        win_threshold: usize,
    ) -> bool;
}

/// Steps from `(row, col)` by `delta` and returns the next coordinate if it is on the board.
fn step(board: &Board, row: usize, col: usize, delta: (isize, isize)) -> Option<(usize, usize)> {
    let r = row.checked_add_signed(delta.0)?;
    let c = col.checked_add_signed(delta.1)?;
    (r < board.rows() && c < board.cols()).then_some((r, c))
}

/// Counts consecutive cells owned by `mover` after `(row, col)` in direction
/// `delta`, examining at most `limit` cells.
fn count_in_direction(
    board: &Board,
    row: usize,
    col: usize,
    delta: (isize, isize),
    mover: PlayerId,
    limit: usize,
) -> usize {
    let mut count = 0;
    let (mut r, mut c) = (row, col);
    while count < limit {
        match step(board, r, c, delta) {
            Some((nr, nc)) if board.get(nr, nc).is_some_and(|cell| cell.is_owned_by(mover)) => {
                count += 1;
                r = nr;
                c = nc;
            }
            _ => break,
        }
    }
    count
}

/// Incremental detector: O(`win_threshold`) work per call.
#[derive(Debug, Clone)]
pub struct LineWinDetector {
    orientations: Vec<Orientation>,
}

impl LineWinDetector {
    /// Creates a detector checking all four orientations in order.
    pub fn new() -> Self {
        Self {
            orientations: Orientation::iter().collect(),
        }
    }

    /// Orientations in checking order.
    pub fn orientations(&self) -> &[Orientation] {
        &self.orientations
    }

    /// Length of the mover's run through `(row, col)` along `orientation`,
    /// counting the cell itself. Not capped by any threshold.
    #[instrument(skip(board))]
    pub fn run_length(
        &self,
        board: &Board,
        row: usize,
        col: usize,
        mover: PlayerId,
        orientation: Orientation,
    ) -> usize {
        let (dr, dc) = orientation.delta();
        let limit = board.rows().max(board.cols());
        1 + count_in_direction(board, row, col, (dr, dc), mover, limit)
            + count_in_direction(board, row, col, (-dr, -dc), mover, limit)
    }
}

impl Default for LineWinDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl WinDetector for LineWinDetector {
    #[instrument(skip(self, board), fields(rows = board.rows(), cols = board.cols()))]
    fn check_win(
        &self,
        board: &Board,
        last_row: usize,
        last_col: usize,
        mover: PlayerId,
        win_threshold: usize,
    ) -> bool {
        if win_threshold <= 1 {
            return true;
        }
        // Neither direction needs to look further than threshold - 1 cells.
        let reach = win_threshold - 1;
        self.orientations.iter().any(|orientation| {
            let (dr, dc) = orientation.delta();
            let count = 1
                + count_in_direction(board, last_row, last_col, (dr, dc), mover, reach)
                + count_in_direction(board, last_row, last_col, (-dr, -dc), mover, reach);
            trace!(%orientation, count, "Counted run");
            count >= win_threshold
        })
    }
}

/// Reference detector: scans every full line through the last move.
///
/// Work is proportional to the board's extent rather than the threshold.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanWinDetector;

impl ScanWinDetector {
    /// Length of the mover's run containing `(row, col)`, found by walking
    /// the whole line through it from one board edge.
    fn run_through(
        board: &Board,
        row: usize,
        col: usize,
        mover: PlayerId,
        orientation: Orientation,
    ) -> usize {
        let (dr, dc) = orientation.delta();
        let (mut r, mut c) = (row, col);
        while let Some((pr, pc)) = step(board, r, c, (-dr, -dc)) {
            r = pr;
            c = pc;
        }

        let mut current = 0;
        let mut reached = false;
        let mut cursor = Some((r, c));
        while let Some((r, c)) = cursor {
            if board.get(r, c).is_some_and(|cell| cell.is_owned_by(mover)) {
                current += 1;
                reached |= (r, c) == (row, col);
            } else if reached {
                break;
            } else {
                current = 0;
            }
            cursor = step(board, r, c, (dr, dc));
        }
        if reached { current } else { 0 }
    }
}

impl WinDetector for ScanWinDetector {
    #[instrument(skip(self, board), fields(rows = board.rows(), cols = board.cols()))]
    fn check_win(
        &self,
        board: &Board,
        last_row: usize,
        last_col: usize,
        mover: PlayerId,
        win_threshold: usize,
    ) -> bool {
        if win_threshold <= 1 {
            return true;
        }
        Orientation::iter().any(|orientation| {
            Self::run_through(board, last_row, last_col, mover, orientation) >= win_threshold
        })
    }
}
