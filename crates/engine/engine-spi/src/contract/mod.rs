//! Contract definitions for the pattern engine.
//!
//! This module contains trait definitions that providers must implement.

mod admission_control;
mod result_cache;

pub use admission_control::AdmissionControl;
pub use result_cache::ResultCache;
