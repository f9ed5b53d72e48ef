//! Pattern Detection Service Provider Interface
//!
//! Defines traits and types for streaming pattern detection.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::PatternDetector;
pub use error::{PatternError, Result};
pub use model::{Classification, PatternResult, Severity};
