//! Error types for the series window store.
//!
//! This module contains error types and the Result alias.

mod series_error;

pub use series_error::{Result, SeriesError};
