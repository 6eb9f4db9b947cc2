//! Board storage for the generalized grid.

use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Smallest allowed extent for either board dimension.
pub const MIN_DIMENSION: usize = 3;

/// Largest allowed extent for either board dimension.
pub const MAX_DIMENSION: usize = 1000;

/// Clamps one requested dimension into `MIN_DIMENSION..=MAX_DIMENSION`.
fn clamp_dimension(requested: usize, axis: &'static str) -> usize {
    if requested > MAX_DIMENSION {
        warn!(axis, requested, max = MAX_DIMENSION, "Board dimension capped");
    }
    requested.clamp(MIN_DIMENSION, MAX_DIMENSION)
}

/// Ordinal identity of a player within the current roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub usize);

impl PlayerId {
    /// Returns the roster index of this player.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Cell claimed by a player.
    Occupied(PlayerId),
}

impl Cell {
    /// Returns the owner of this cell, if any.
    pub fn owner(self) -> Option<PlayerId> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(id) => Some(id),
        }
    }

    /// Checks whether the cell is owned by `player`.
    pub fn is_owned_by(self, player: PlayerId) -> bool {
        self == Cell::Occupied(player)
    }
}

/// Rows × cols grid of cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board, clamping each dimension into
    /// [`MIN_DIMENSION`]`..=`[`MAX_DIMENSION`].
    #[instrument]
    pub fn new(rows: usize, cols: usize) -> Self {
        let rows = clamp_dimension(rows, "rows");
        let cols = clamp_dimension(cols, "cols");
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Checks whether a signed coordinate falls outside the grid.
    pub fn is_out_of_bounds(&self, row: isize, col: isize) -> bool {
        row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.cols
    }

    /// Gets the cell at `(row, col)`, or `None` if the coordinate is off the board.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.cells[self.idx(row, col)])
    }

    /// Sets the cell at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds. Callers validate first.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) outside {}x{} board",
            self.rows,
            self.cols
        );
        let idx = self.idx(row, col);
        self.cells[idx] = cell;
    }

    /// Replaces the grid with an empty `rows × cols` grid.
    ///
    /// Dimensions are clamped as in [`Board::new`]. Occupancy is not
    /// carried over.
    #[instrument(skip(self), fields(old_rows = self.rows, old_cols = self.cols))]
    pub fn resize(&mut self, rows: usize, cols: usize) {
        *self = Self::new(rows, cols);
    }

    /// Empties every cell, keeping the dimensions.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Iterates over the rows as slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.cols)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}
