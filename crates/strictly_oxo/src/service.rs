//! Thread-safe game service exposing the public operations.
//!
//! The service composes a [`GameEngine`] with an [`InvalidatingStateCache`]
//! of its projection. Mutations serialize on the engine's write lock and
//! invalidate the cache before delegating; reads are served from the cache
//! and, on a miss, project under the engine's read lock while the cache lock
//! is free.

use crate::cache::{CacheStats, InvalidatingStateCache};
use crate::config::GameConfig;
use crate::engine::{GameEngine, MoveOutcome};
use crate::error::MoveError;
use crate::projection::Projection;
use crate::rules::{LineWinDetector, WinDetector};
use crate::telemetry::{OperationStats, PerformanceReport};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Game service shared between request handlers.
#[derive(Debug)]
pub struct GameService<D = LineWinDetector> {
    engine: RwLock<GameEngine<D>>,
    cache: InvalidatingStateCache<Projection>,
    telemetry: OperationStats,
}

impl GameService<LineWinDetector> {
    /// Creates a service from configuration.
    #[instrument]
    pub fn new(config: &GameConfig) -> Self {
        Self::with_engine(GameEngine::from_config(config), *config.cache_enabled())
    }
}

impl Default for GameService<LineWinDetector> {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

impl<D: WinDetector> GameService<D> {
    /// Wraps an existing engine.
    #[instrument(skip(engine))]
    pub fn with_engine(engine: GameEngine<D>, cache_enabled: bool) -> Self {
        info!(cache_enabled, "Creating game service");
        Self {
            engine: RwLock::new(engine),
            cache: InvalidatingStateCache::new(cache_enabled),
            telemetry: OperationStats::new(),
        }
    }

    fn read_engine(&self) -> RwLockReadGuard<'_, GameEngine<D>> {
        self.engine.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_engine(&self) -> RwLockWriteGuard<'_, GameEngine<D>> {
        self.engine.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn project(&self) -> Arc<Projection> {
        self.cache.read(|| self.read_engine().project())
    }

    /// Runs a mutation with the engine write-locked and the cache invalidated.
    fn mutate<R>(&self, f: impl FnOnce(&mut GameEngine<D>) -> R) -> R {
        let mut engine = self.write_engine();
        self.cache.invalidate();
        f(&mut *engine)
    }

    /// Plays a textual move such as `"b2"` and returns the resulting state.
    ///
    /// Moves on a concluded match are ignored and return the unchanged state.
    ///
    /// # Errors
    ///
    /// Returns the [`MoveError`] rejecting the move; the state is unchanged.
    #[instrument(skip(self))]
    pub fn apply_move(&self, command: &str) -> Result<Arc<Projection>, MoveError> {
        let start = Instant::now();
        let result = self.mutate(|engine| engine.apply_move(command));
        let result = match result {
            Ok(outcome) => {
                if outcome == MoveOutcome::Ignored {
                    debug!("Move ignored, match already concluded");
                }
                Ok(self.project())
            }
            Err(e) => {
                warn!(error = %e, "Move rejected");
                Err(e)
            }
        };
        self.telemetry.record("makeMove", start.elapsed());
        result
    }

    /// Current state, served from the cache when valid.
    #[instrument(skip(self))]
    pub fn get_state(&self) -> Arc<Projection> {
        self.telemetry.time("getGameState", || self.project())
    }

    /// Sets the number of players and resets the match.
    #[instrument(skip(self))]
    pub fn set_players(&self, count: usize) -> Arc<Projection> {
        self.telemetry.time("setPlayers", || {
            self.mutate(|engine| engine.set_players(count));
            self.project()
        })
    }

    /// Resizes the board and resets the match.
    #[instrument(skip(self))]
    pub fn set_board_size(&self, rows: usize, cols: usize) -> Arc<Projection> {
        self.telemetry.time("setBoardSize", || {
            self.mutate(|engine| engine.set_board_size(rows, cols));
            self.project()
        })
    }

    /// Changes the win threshold and resets the match.
    #[instrument(skip(self))]
    pub fn set_win_threshold(&self, win_threshold: usize) -> Arc<Projection> {
        self.telemetry.time("setWinThreshold", || {
            self.mutate(|engine| engine.set_win_threshold(win_threshold));
            self.project()
        })
    }

    /// Clears the board and match state, and resets the cache with its counters.
    #[instrument(skip(self))]
    pub fn reset_game(&self) -> Arc<Projection> {
        self.telemetry.time("resetGame", || {
            {
                let mut engine = self.write_engine();
                self.cache.reset();
                engine.reset();
            }
            self.project()
        })
    }

    /// Cache telemetry.
    #[instrument(skip(self))]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Operation timings.
    #[instrument(skip(self))]
    pub fn performance(&self) -> PerformanceReport {
        self.telemetry.time("getPerformanceStats", || self.telemetry.report())
    }
}
