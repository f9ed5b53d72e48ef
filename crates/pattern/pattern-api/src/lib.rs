//! Pattern Detection API
//!
//! Configuration types for the streaming detector.

use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use pattern_spi::{Classification, PatternDetector, PatternError, PatternResult, Result, Severity};

/// Streaming detector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Absolute z-score above which the latest value is a spike candidate
    /// (default: 3.0).
    pub z_threshold: f64,
    /// Minimum retained samples before any classification other than an
    /// insufficient-data Normal (default: 2).
    pub min_samples: usize,
    /// Points in each of the two linear fits used for trend comparison
    /// (default: 8).
    pub trend_points: usize,
    /// A fitted slope is significant when the change it implies across the
    /// fit horizon exceeds this many rolling standard deviations
    /// (default: 1.0).
    pub trend_tolerance: f64,
    /// Sigma-units of deviation from the same-phase baseline that count as
    /// a seasonal break (default: 3.0).
    pub seasonal_tolerance: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            z_threshold: 3.0,
            min_samples: 2,
            trend_points: 8,
            trend_tolerance: 1.0,
            seasonal_tolerance: 3.0,
        }
    }
}

impl DetectorConfig {
    pub fn new(z_threshold: f64) -> Self {
        Self {
            z_threshold,
            ..Self::default()
        }
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if !(self.z_threshold > 0.0) {
            return Err(PatternError::InvalidParameter {
                name: "z_threshold".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if self.min_samples < 2 {
            return Err(PatternError::InvalidParameter {
                name: "min_samples".to_string(),
                reason: "must be at least 2".to_string(),
            });
        }
        if self.trend_points < 3 {
            return Err(PatternError::InvalidParameter {
                name: "trend_points".to_string(),
                reason: "must be at least 3".to_string(),
            });
        }
        if !(self.trend_tolerance > 0.0) {
            return Err(PatternError::InvalidParameter {
                name: "trend_tolerance".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if !(self.seasonal_tolerance > 0.0) {
            return Err(PatternError::InvalidParameter {
                name: "seasonal_tolerance".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}
