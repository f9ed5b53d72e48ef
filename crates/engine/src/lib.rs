//! Pattern Engine Facade
//!
//! Unified re-exports for the engine module.
//!
//! This facade provides a single entry point to the whole engine:
//! - Outcome types, contracts, and errors from SPI
//! - `EngineConfig` and component configs from API
//! - `PatternEngine`, `PatternCache`, `AdmissionController`, and
//!   `DispatchQueue` from Core

// Re-export everything from SPI
pub use engine_spi::*;

// Re-export everything from API
pub use engine_api::*;

// Re-export everything from Core
pub use engine_core::*;
