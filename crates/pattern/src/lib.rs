//! Pattern Detection Facade
//!
//! Unified re-exports for the pattern detection module.
//!
//! This facade provides a single entry point to all detection functionality:
//! - `PatternDetector` trait, `PatternResult`, and `Classification` from SPI
//! - `DetectorConfig` from API
//! - `StreamingDetector` from Core

// Re-export everything from SPI
pub use pattern_spi::*;

// Re-export everything from API
pub use pattern_api::*;

// Re-export everything from Core
pub use pattern_core::*;
