//! Invalidating single-slot cache for derived state.
//!
//! Reads are served from the slot until a writer calls
//! [`InvalidatingStateCache::invalidate`]. The value is recomputed outside
//! the lock, so an expensive projection never blocks other readers from
//! checking the slot. Every invalidation bumps a generation counter; a value
//! whose computation overlapped an invalidation is returned to its caller
//! but never stored as clean.

use derive_getters::Getters;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, instrument, trace};

/// Whether the slot reflects the latest write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CacheValidity {
    /// Slot holds the current value.
    Valid,
    /// Slot is empty or stale.
    Invalid,
}

/// Snapshot of cache telemetry.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Reads served from the slot.
    hits: u64,
    /// Reads that had to compute.
    misses: u64,
    /// `hits / (hits + misses)`, or 0 before the first read.
    hit_rate: f64,
    /// Number of stored values (0 or 1).
    cache_size: usize,
    /// Whether caching is switched on.
    enabled: bool,
    /// State of the slot.
    validity: CacheValidity,
}

#[derive(Debug)]
struct Slot<T> {
    value: Option<Arc<T>>,
    dirty: bool,
    generation: u64,
    hits: u64,
    misses: u64,
}

/// Single-value cache invalidated by writers.
#[derive(Debug)]
pub struct InvalidatingStateCache<T> {
    slot: Mutex<Slot<T>>,
    enabled: bool,
}

impl<T> InvalidatingStateCache<T> {
    /// Creates an empty, dirty cache.
    #[instrument]
    pub fn new(enabled: bool) -> Self {
        Self {
            slot: Mutex::new(Slot {
                value: None,
                dirty: true,
                generation: 0,
                hits: 0,
                misses: 0,
            }),
            enabled,
        }
    }

    // Critical sections only touch flags and counters, so a poisoned slot is
    // still consistent.
    fn lock(&self) -> MutexGuard<'_, Slot<T>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the cached value, or computes, stores and returns a fresh one.
    ///
    /// `compute` runs without the cache lock held. If another reader
    /// refreshed the slot in the meantime, the freshly computed value is
    /// dropped and the stored one returned, counted as a hit.
    #[instrument(skip_all)]
    pub fn read<F>(&self, compute: F) -> Arc<T>
    where
        F: FnOnce() -> T,
    {
        let generation = {
            let mut slot = self.lock();
            if self.enabled
                && !slot.dirty
                && let Some(value) = slot.value.as_ref().map(Arc::clone)
            {
                slot.hits += 1;
                trace!(hits = slot.hits, "Cache hit");
                return value;
            }
            slot.generation
        };

        let fresh = Arc::new(compute());

        let mut slot = self.lock();
        if !self.enabled {
            slot.misses += 1;
            return fresh;
        }
        if slot.generation != generation {
            // Invalidated while computing; the value may predate the write.
            slot.misses += 1;
            debug!(
                started = generation,
                current = slot.generation,
                "Discarding overlapped computation"
            );
            return fresh;
        }
        if !slot.dirty
            && let Some(value) = slot.value.as_ref().map(Arc::clone)
        {
            slot.hits += 1;
            debug!("Concurrent reader refreshed first");
            return value;
        }
        slot.value = Some(Arc::clone(&fresh));
        slot.dirty = false;
        slot.misses += 1;
        debug!(misses = slot.misses, "Cache refreshed");
        fresh
    }

    /// Marks the stored value stale. It stays in memory but is never served.
    #[instrument(skip(self))]
    pub fn invalidate(&self) {
        let mut slot = self.lock();
        slot.dirty = true;
        slot.generation += 1;
        trace!(generation = slot.generation, "Cache invalidated");
    }

    /// Drops the stored value and zeroes the hit and miss counters.
    #[instrument(skip(self))]
    pub fn reset(&self) {
        let mut slot = self.lock();
        slot.value = None;
        slot.dirty = true;
        slot.generation += 1;
        slot.hits = 0;
        slot.misses = 0;
        debug!("Cache reset");
    }

    /// Returns current telemetry.
    #[instrument(skip(self))]
    pub fn stats(&self) -> CacheStats {
        let slot = self.lock();
        let total = slot.hits + slot.misses;
        CacheStats {
            hits: slot.hits,
            misses: slot.misses,
            hit_rate: if total == 0 {
                0.0
            } else {
                slot.hits as f64 / total as f64
            },
            cache_size: usize::from(slot.value.is_some()),
            enabled: self.enabled,
            validity: if slot.dirty {
                CacheValidity::Invalid
            } else {
                CacheValidity::Valid
            },
        }
    }
}

impl<T> Default for InvalidatingStateCache<T> {
    fn default() -> Self {
        Self::new(true)
    }
}
