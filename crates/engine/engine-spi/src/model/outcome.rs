//! Caller-visible outcomes for engine operations.

use pattern_spi::PatternResult;
use series_spi::SeriesError;

/// Outcome of one ingestion call.
///
/// Every failure mode is an explicit variant; nothing is thrown across the
/// engine boundary and nothing is retried internally.
#[derive(Debug, Clone)]
pub enum IngestOutcome {
    /// The observation was appended. Carries the detection result when this
    /// append crossed the detection interval.
    Accepted {
        series_key: String,
        window_len: usize,
        detection: Option<PatternResult>,
    },
    /// The observation was rejected without mutating any state.
    Rejected(SeriesError),
    /// Admission control denied the call; retry later.
    RateLimited,
}

/// Outcome of one pattern query.
#[derive(Debug, Clone)]
pub enum QueryOutcome {
    /// A result for the series' current window state.
    Found(PatternResult),
    /// Admission control denied the call; retry later.
    RateLimited,
    /// The series has no window yet.
    NotFound,
}

impl IngestOutcome {
    /// True for the Accepted variant.
    pub fn is_accepted(&self) -> bool {
        matches!(self, IngestOutcome::Accepted { .. })
    }
}

impl QueryOutcome {
    /// The result, when one was found.
    pub fn result(&self) -> Option<&PatternResult> {
        match self {
            QueryOutcome::Found(result) => Some(result),
            _ => None,
        }
    }
}
