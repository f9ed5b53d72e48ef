//! Immutable window snapshots.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Seasonal context carried by a snapshot when the series has a configured
/// period and enough completed periods to compare against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalContext {
    /// Configured period length in observations.
    pub period: usize,
    /// Phase (offset within the period) of the latest value.
    pub phase: usize,
    /// Baseline value for that phase, folded from completed periods only.
    pub baseline: f64,
    /// True once at least two full periods have been folded.
    pub established: bool,
}

/// Immutable copy of a series window handed to the detector and the cache
/// fingerprinting. Never aliases the live buffer, so concurrent appends
/// cannot corrupt an in-flight detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSnapshot {
    /// Key of the series this snapshot was taken from.
    pub series_key: String,
    /// Retained values, oldest first.
    pub values: Vec<f64>,
    /// Timestamp of the oldest retained value.
    pub first_timestamp: i64,
    /// Timestamp of the newest retained value.
    pub last_timestamp: i64,
    /// Total observations ever accepted for this series, including points
    /// already evicted from the ring buffer.
    pub accepted: u64,
    /// Rolling mean of the retained values.
    pub mean: f64,
    /// Rolling population variance of the retained values.
    pub variance: f64,
    /// Seasonal context, when a period is configured.
    pub seasonal: Option<SeasonalContext>,
}

impl WindowSnapshot {
    /// Number of retained values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the snapshot holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Newest retained value.
    pub fn latest(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Rolling standard deviation of the retained values.
    pub fn std_dev(&self) -> f64 {
        self.variance.max(0.0).sqrt()
    }

    /// Fingerprint summarizing the window boundary: a hash of the newest
    /// timestamp and the total accepted count. A cached result is valid only
    /// while the caller's fingerprint matches.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.last_timestamp.hash(&mut hasher);
        self.accepted.hash(&mut hasher);
        hasher.finish()
    }
}
