//! Series store error types.

use thiserror::Error;

/// Errors returned by the series window store.
///
/// Every variant is a per-call rejection; the store never mutates state on
/// the failing path and never retries internally.
#[derive(Debug, Clone, Error)]
pub enum SeriesError {
    #[error("Out of order: series '{series}' last accepted {last}, got {got}")]
    OutOfOrder { series: String, last: i64, got: i64 },

    #[error("Invalid value: series '{series}' got non-finite value {value}")]
    InvalidValue { series: String, value: f64 },
}

/// Result type for series store operations.
pub type Result<T> = std::result::Result<T, SeriesError>;
