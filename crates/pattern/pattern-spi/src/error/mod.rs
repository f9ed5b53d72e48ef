//! Error types for pattern detection.
//!
//! This module contains error types and the Result alias.

mod pattern_error;

pub use pattern_error::{PatternError, Result};
