//! Error types for the pattern engine.
//!
//! This module contains error types and the Result alias.

mod engine_error;

pub use engine_error::{EngineError, Result};
