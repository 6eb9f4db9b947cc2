//! Draw detection.

use crate::board::{Board, Cell};
use tracing::instrument;

/// Checks if every cell is occupied.
///
/// Evaluated after a move that did not win, so a full board means a draw.
#[instrument(skip(board), fields(rows = board.rows(), cols = board.cols()))]
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|c| *c != Cell::Empty)
}
