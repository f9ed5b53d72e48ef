//! Pattern detection result types.

use serde::{Deserialize, Serialize};

use super::Classification;

/// Severity attached to a detection result, derived from its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    None,
    Warning,
    Critical,
}

/// Result of one pattern detection over a window snapshot.
///
/// Results are immutable once created; a newer detection replaces, never
/// edits, an older one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternResult {
    /// Key of the series the window belongs to.
    pub series_key: String,
    /// Fingerprint of the window state this result was computed from.
    pub window_fingerprint: u64,
    /// Score of the winning classification (z-score units for spikes,
    /// sigma-normalized deviations for trend and seasonal findings).
    pub score: f64,
    /// The single winning classification.
    pub classification: Classification,
    /// Severity derived from the score.
    pub severity: Severity,
    /// True when the window held too few samples to judge; the result is
    /// then Normal with score 0.
    pub insufficient_data: bool,
    /// Epoch seconds when the detection ran.
    pub computed_at: u64,
}
