//! Series Window Store Facade
//!
//! Unified re-exports for the series window store module.
//!
//! This facade provides a single entry point to all series functionality:
//! - `SeriesStore` trait, models, and errors from SPI
//! - `WindowConfig` from API
//! - `SeriesWindow` and `InMemorySeriesStore` from Core

// Re-export everything from SPI
pub use series_spi::*;

// Re-export everything from API
pub use series_api::*;

// Re-export everything from Core
pub use series_core::*;
