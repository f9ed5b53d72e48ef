//! Series Window Store Service Provider Interface
//!
//! Defines traits and types for per-key windowed series state.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::SeriesStore;
pub use error::{Result, SeriesError};
pub use model::{Observation, SeasonalContext, WindowSnapshot};
