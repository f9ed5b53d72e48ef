//! Pattern Engine Service Provider Interface
//!
//! Defines traits and types for the engine that ties windows, detection,
//! caching, admission control, and dispatch together.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{AdmissionControl, ResultCache};
pub use error::{EngineError, Result};
pub use model::{DispatchItem, EngineStats, IngestOutcome, OperationKind, QueryOutcome};

// Re-export the sibling SPI types embedded in the models above
pub use pattern_spi::{Classification, PatternDetector, PatternResult, Severity};
pub use series_spi::{Observation, SeriesError, WindowSnapshot};
