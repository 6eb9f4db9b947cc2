//! Match state machine.
//!
//! [`GameEngine`] owns the board, the roster and the match state. Every move
//! goes validate → place → detect win or draw → advance turn.

use crate::board::{Board, Cell, MAX_DIMENSION, MIN_DIMENSION, PlayerId};
use crate::command::Command;
use crate::config::GameConfig;
use crate::error::MoveError;
use crate::player::Roster;
use crate::projection::{EMPTY_MARKER, Projection};
use crate::rules::{LineWinDetector, WinDetector, is_full};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Phase of the current match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Moves are accepted.
    InProgress,
    /// A player completed a run.
    Won(PlayerId),
    /// Board filled with no winner.
    Drawn,
}

impl MatchStatus {
    /// True once the match is won or drawn.
    pub fn is_concluded(self) -> bool {
        !matches!(self, MatchStatus::InProgress)
    }
}

/// What a successful call to [`GameEngine::apply_move`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Match already concluded; nothing changed.
    Ignored,
    /// Piece placed, turn passed on.
    Continued {
        /// Player who moved.
        mover: PlayerId,
        /// Player now to move.
        next: PlayerId,
    },
    /// Piece placed and completed a winning run.
    Won(PlayerId),
    /// Piece placed and filled the board.
    Drawn,
}

/// Game engine, generic over the win detector.
#[derive(Debug, Clone)]
pub struct GameEngine<D = LineWinDetector> {
    board: Board,
    roster: Roster,
    current: usize,
    status: MatchStatus,
    win_threshold: usize,
    detector: D,
}

impl GameEngine<LineWinDetector> {
    /// Creates an engine with an empty roster. Moves fail with
    /// [`MoveError::NoPlayersConfigured`] until [`GameEngine::set_players`] is called.
    #[instrument]
    pub fn new(rows: usize, cols: usize, win_threshold: usize) -> Self {
        Self::with_detector(rows, cols, win_threshold, LineWinDetector::new())
    }

    /// Creates an engine from configuration.
    #[instrument]
    pub fn from_config(config: &GameConfig) -> Self {
        Self::from_config_with_detector(config, LineWinDetector::new())
    }
}

impl<D: WinDetector> GameEngine<D> {
    /// Creates an engine with an empty roster and the given detector.
    #[instrument(skip(detector))]
    pub fn with_detector(rows: usize, cols: usize, win_threshold: usize, detector: D) -> Self {
        Self {
            board: Board::new(rows, cols),
            roster: Roster::default(),
            current: 0,
            status: MatchStatus::InProgress,
            win_threshold: win_threshold.max(1),
            detector,
        }
    }

    /// Creates an engine from configuration with the given detector.
    #[instrument(skip(detector))]
    pub fn from_config_with_detector(config: &GameConfig, detector: D) -> Self {
        let mut engine = Self::with_detector(
            *config.rows(),
            *config.cols(),
            *config.win_threshold(),
            detector,
        );
        engine.set_players(*config.players());
        engine
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Returns the match status.
    pub fn status(&self) -> MatchStatus {
        self.status
    }

    /// Run length needed to win.
    pub fn win_threshold(&self) -> usize {
        self.win_threshold
    }

    /// Player to move, or `None` with an empty roster.
    pub fn current_player(&self) -> Option<PlayerId> {
        (self.current < self.roster.len()).then_some(PlayerId(self.current))
    }

    /// Decodes `command` and plays it for the current player.
    ///
    /// A move on a concluded match returns [`MoveOutcome::Ignored`].
    ///
    /// # Errors
    ///
    /// Any [`MoveError`] raised by decoding or placement.
    #[instrument(skip(self), fields(status = ?self.status))]
    pub fn apply_move(&mut self, command: &str) -> Result<MoveOutcome, MoveError> {
        if let Some(outcome) = self.precheck()? {
            return Ok(outcome);
        }
        let (row, col) = Command::parse(command)?.resolve(&self.board)?;
        self.play(row, col)
    }

    /// Plays the current player at `(row, col)`.
    ///
    /// Same checks as [`GameEngine::apply_move`] minus decoding.
    #[instrument(skip(self), fields(status = ?self.status))]
    pub fn place(&mut self, row: usize, col: usize) -> Result<MoveOutcome, MoveError> {
        if let Some(outcome) = self.precheck()? {
            return Ok(outcome);
        }
        let (row, col) = Command::at(row, col).resolve(&self.board)?;
        self.play(row, col)
    }

    fn precheck(&self) -> Result<Option<MoveOutcome>, MoveError> {
        if self.roster.is_empty() {
            return Err(MoveError::NoPlayersConfigured);
        }
        if self.status.is_concluded() {
            debug!(status = ?self.status, "Ignoring move on concluded match");
            return Ok(Some(MoveOutcome::Ignored));
        }
        Ok(None)
    }

    fn play(&mut self, row: usize, col: usize) -> Result<MoveOutcome, MoveError> {
        if self.board.get(row, col) != Some(Cell::Empty) {
            return Err(MoveError::CellAlreadyOccupied { row, col });
        }

        let mover = PlayerId(self.current);
        self.board.set(row, col, Cell::Occupied(mover));

        if self
            .detector
            .check_win(&self.board, row, col, mover, self.win_threshold)
        {
            info!(?mover, row, col, "Match won");
            self.status = MatchStatus::Won(mover);
            return Ok(MoveOutcome::Won(mover));
        }

        if is_full(&self.board) {
            info!("Match drawn");
            self.status = MatchStatus::Drawn;
            return Ok(MoveOutcome::Drawn);
        }

        self.current = (self.current + 1) % self.roster.len();
        let next = PlayerId(self.current);
        debug!(?mover, ?next, row, col, "Move applied");
        Ok(MoveOutcome::Continued { mover, next })
    }

    /// Rebuilds the roster with `count` players and resets the match.
    ///
    /// `count` is clamped to `1..=`[`MAX_DIMENSION`]. The board grows so both
    /// dimensions are at least `count`.
    #[instrument(skip(self))]
    pub fn set_players(&mut self, count: usize) {
        if count > MAX_DIMENSION {
            warn!(requested = count, max = MAX_DIMENSION, "Player count capped");
        }
        let count = count.clamp(1, MAX_DIMENSION);
        let (rows, cols) = (self.board.rows(), self.board.cols());
        if count > rows || count > cols {
            self.set_board_size(rows.max(count), cols.max(count));
        }
        self.roster = Roster::with_count(count);
        info!(count, "Players set");
        self.reset();
    }

    /// Resizes the board (dimensions clamped to `3..=`[`MAX_DIMENSION`]) and resets the match.
    #[instrument(skip(self))]
    pub fn set_board_size(&mut self, rows: usize, cols: usize) {
        self.board.resize(rows, cols);
        info!(
            rows = self.board.rows(),
            cols = self.board.cols(),
            min = MIN_DIMENSION,
            max = MAX_DIMENSION,
            "Board resized"
        );
        self.reset();
    }

    /// Changes the run length needed to win (at least 1) and resets the match.
    #[instrument(skip(self))]
    pub fn set_win_threshold(&mut self, win_threshold: usize) {
        self.win_threshold = win_threshold.max(1);
        info!(win_threshold = self.win_threshold, "Win threshold set");
        self.reset();
    }

    /// Clears the board and match state. Roster and dimensions are kept.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board.clear();
        self.status = MatchStatus::InProgress;
        self.current = 0;
        debug!("Match reset");
    }

    /// Builds the display view of the current state. No side effects.
    #[instrument(skip(self))]
    pub fn project(&self) -> Projection {
        let board = self
            .board
            .iter_rows()
            .map(|row| {
                row.iter()
                    .map(|cell| {
                        cell.owner()
                            .and_then(|id| self.roster.marker(id))
                            .unwrap_or(EMPTY_MARKER)
                    })
                    .collect()
            })
            .collect();
        let winner = match self.status {
            MatchStatus::Won(id) => self.roster.marker(id),
            _ => None,
        };
        Projection::new(
            self.board.rows(),
            self.board.cols(),
            self.win_threshold,
            self.roster.len(),
            self.current_player().and_then(|id| self.roster.marker(id)),
            winner,
            self.status == MatchStatus::Drawn,
            board,
        )
    }
}
