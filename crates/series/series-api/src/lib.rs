//! Series Window Store API
//!
//! Configuration types for per-key series windows.

use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use series_spi::{Observation, Result, SeasonalContext, SeriesError, SeriesStore, WindowSnapshot};

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Maximum observations retained per series (default: 128).
    pub capacity: usize,
    /// Seasonal period in observations, when the series is known to repeat
    /// (default: none).
    pub seasonal_period: Option<usize>,
    /// Seconds without traffic before a window is eligible for idle
    /// eviction (default: 3600).
    pub idle_eviction_secs: u64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            capacity: 128,
            seasonal_period: None,
            idle_eviction_secs: 3600,
        }
    }
}

impl WindowConfig {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Set the seasonal period.
    pub fn with_seasonal_period(mut self, period: usize) -> Self {
        self.seasonal_period = Some(period);
        self
    }

    /// Set the idle eviction period.
    pub fn with_idle_eviction_secs(mut self, secs: u64) -> Self {
        self.idle_eviction_secs = secs;
        self
    }
}
