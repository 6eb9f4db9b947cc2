//! Game rules.
//!
//! Pure functions and detectors evaluating a board. Rules are kept apart
//! from board storage so the engine can swap detectors.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LineWinDetector, Orientation, ScanWinDetector, WinDetector};
