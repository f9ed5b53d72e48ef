//! Engine error types.

use thiserror::Error;

/// Errors raised while building an engine.
///
/// Per-call failures never surface here; they are explicit outcome
/// variants instead.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {name} - {reason}")]
    InvalidConfig { name: String, reason: String },
}

/// Result type for engine construction.
pub type Result<T> = std::result::Result<T, EngineError>;
