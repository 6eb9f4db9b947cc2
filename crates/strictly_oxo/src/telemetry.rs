//! Per-operation call timing.
//!
//! Durations are kept as [`Duration`] and serialized as fractional
//! milliseconds (`totalTimeMs`, `avgTimeMs`, ...).

use derive_getters::Getters;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::{instrument, trace};

fn millis(duration: Duration) -> f64 {
    duration.as_nanos() as f64 / 1_000_000.0
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(millis(*duration))
}

/// Accumulated timings for one operation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Getters)]
pub struct OperationStat {
    /// Number of recorded calls.
    call_count: u64,
    /// Sum of all durations.
    total: Duration,
    /// Fastest call, zero before the first call.
    min: Duration,
    /// Slowest call.
    max: Duration,
}

impl OperationStat {
    fn record(&mut self, elapsed: Duration) {
        self.min = if self.call_count == 0 {
            elapsed
        } else {
            self.min.min(elapsed)
        };
        self.max = self.max.max(elapsed);
        self.total += elapsed;
        self.call_count += 1;
    }

    /// Mean duration, zero before the first call.
    pub fn average(&self) -> Duration {
        if self.call_count == 0 {
            return Duration::ZERO;
        }
        Duration::from_nanos((self.total.as_nanos() / u128::from(self.call_count)) as u64)
    }
}

impl Serialize for OperationStat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("OperationStat", 5)?;
        state.serialize_field("callCount", &self.call_count)?;
        state.serialize_field("totalTimeMs", &millis(self.total))?;
        state.serialize_field("minTimeMs", &millis(self.min))?;
        state.serialize_field("maxTimeMs", &millis(self.max))?;
        state.serialize_field("avgTimeMs", &millis(self.average()))?;
        state.end()
    }
}

/// Timings for all operations plus uptime.
#[derive(Debug, Clone, PartialEq, Getters, Serialize)]
pub struct PerformanceReport {
    /// Time since the recorder was created.
    #[serde(rename = "uptimeMs", serialize_with = "serialize_millis")]
    uptime: Duration,
    /// Stats keyed by operation name.
    operations: BTreeMap<String, OperationStat>,
}

/// Thread-safe recorder of operation durations.
#[derive(Debug)]
pub struct OperationStats {
    started: Instant,
    stats: Mutex<BTreeMap<&'static str, OperationStat>>,
}

impl OperationStats {
    /// Creates an empty recorder; uptime counts from now.
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            stats: Mutex::new(BTreeMap::new()),
        }
    }

    /// Records one call of `operation`.
    pub fn record(&self, operation: &'static str, elapsed: Duration) {
        trace!(operation, ?elapsed, "Recorded call");
        self.stats
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(operation)
            .or_default()
            .record(elapsed);
    }

    /// Runs `f`, recording its duration under `operation`.
    pub fn time<R>(&self, operation: &'static str, f: impl FnOnce() -> R) -> R {
        let start = Instant::now();
        let result = f();
        self.record(operation, start.elapsed());
        result
    }

    /// Snapshot of all timings.
    #[instrument(skip(self))]
    pub fn report(&self) -> PerformanceReport {
        let stats = self.stats.lock().unwrap_or_else(PoisonError::into_inner);
        PerformanceReport {
            uptime: self.started.elapsed(),
            operations: stats.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }
}

impl Default for OperationStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_tracks_min_max_total() {
        let stats = OperationStats::new();
        stats.record("getState", Duration::from_millis(4));
        stats.record("getState", Duration::from_millis(2));
        stats.record("getState", Duration::from_millis(6));
        let report = stats.report();
        let stat = report.operations()["getState"];
        assert_eq!(*stat.call_count(), 3);
        assert_eq!(*stat.min(), Duration::from_millis(2));
        assert_eq!(*stat.max(), Duration::from_millis(6));
        assert_eq!(*stat.total(), Duration::from_millis(12));
        assert_eq!(stat.average(), Duration::from_millis(4));
    }

    #[test]
    fn test_empty_stat_average_is_zero() {
        assert_eq!(OperationStat::default().average(), Duration::ZERO);
    }

    #[test]
    fn test_stat_serializes_millis_with_average() {
        let stats = OperationStats::new();
        stats.record("makeMove", Duration::from_millis(1));
        stats.record("makeMove", Duration::from_millis(3));
        let json = serde_json::to_value(stats.report()).unwrap();
        let stat = &json["operations"]["makeMove"];
        assert_eq!(stat["callCount"], 2);
        assert_eq!(stat["totalTimeMs"], 4.0);
        assert_eq!(stat["minTimeMs"], 1.0);
        assert_eq!(stat["maxTimeMs"], 3.0);
        assert_eq!(stat["avgTimeMs"], 2.0);
        assert!(json["uptimeMs"].is_f64());
    }

    #[test]
    fn test_time_returns_result() {
        let stats = OperationStats::new();
        assert_eq!(stats.time("add", || 2 + 2), 4);
        assert_eq!(*stats.report().operations()["add"].call_count(), 1);
    }
}
