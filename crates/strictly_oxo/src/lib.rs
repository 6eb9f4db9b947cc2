//! Strictly OXO - generalized tic-tac-toe engine
//!
//! Configurable board size, player count and win length, with a win detector
//! that inspects only the neighbourhood of the last move and a thread-safe
//! cache of the display state.
//!
//! # Architecture
//!
//! - **Board**: row-major grid of cells
//! - **Rules**: win detectors behind [`WinDetector`], draw check
//! - **Engine**: move validation and the match state machine
//! - **Cache**: single-slot invalidating cache of the [`Projection`]
//! - **Service**: thread-safe facade for front ends
//!
//! # Example
//!
//! ```
//! use strictly_oxo::{GameConfig, GameService};
//!
//! let service = GameService::new(&GameConfig::default());
//! service.apply_move("a1")?;
//! let state = service.get_state();
//! assert_eq!(*state.current_player(), Some('B'));
//! # Ok::<(), strictly_oxo::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod cache;
mod command;
mod config;
mod engine;
mod error;
mod player;
mod projection;
mod rules;
mod service;
mod telemetry;

// Crate-level exports - Board
pub use board::{Board, Cell, MAX_DIMENSION, MIN_DIMENSION, PlayerId};

// Crate-level exports - Players and commands
pub use command::Command;
pub use player::{Player, Roster, marker_for};

// Crate-level exports - Rules
pub use rules::{LineWinDetector, Orientation, ScanWinDetector, WinDetector, is_full};

// Crate-level exports - Engine
pub use engine::{GameEngine, MatchStatus, MoveOutcome};
pub use projection::{EMPTY_MARKER, Projection};

// Crate-level exports - Cache and service
pub use cache::{CacheStats, CacheValidity, InvalidatingStateCache};
pub use service::GameService;
pub use telemetry::{OperationStat, OperationStats, PerformanceReport};

// Crate-level exports - Configuration and errors
pub use config::GameConfig;
pub use error::{Axis, ConfigError, MoveError};
