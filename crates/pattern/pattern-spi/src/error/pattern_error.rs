//! Pattern detection error types.

use thiserror::Error;

/// Pattern detection errors.
///
/// Detection itself is infallible; errors only arise from invalid
/// configuration.
#[derive(Debug, Clone, Error)]
pub enum PatternError {
    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },
}

/// Result type for pattern detection operations.
pub type Result<T> = std::result::Result<T, PatternError>;
