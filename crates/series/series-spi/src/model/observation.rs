//! Observation types for series ingestion.

use serde::{Deserialize, Serialize};

/// A single numeric observation on one logical time series.
///
/// Timestamps are epoch milliseconds and must be non-decreasing per series;
/// the store rejects anything older than the last accepted point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Key of the logical series this point belongs to.
    pub series_key: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
    /// Observed value.
    pub value: f64,
}

impl Observation {
    /// Create a new observation.
    pub fn new(series_key: impl Into<String>, timestamp: i64, value: f64) -> Self {
        Self {
            series_key: series_key.into(),
            timestamp,
            value,
        }
    }
}
