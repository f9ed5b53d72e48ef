//! Streaming pattern detector.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use pattern_api::DetectorConfig;
use pattern_spi::{Classification, PatternDetector, PatternResult, Result, Severity};
use series_spi::WindowSnapshot;

use crate::trend::least_squares_slope;

/// Scores above this are reported as Critical.
const CRITICAL_SCORE: f64 = 5.0;

/// Streaming pattern detector.
///
/// Classifies the latest behavior of a window snapshot as Normal, Spike,
/// TrendShift, or SeasonalBreak. Seasonal context overrides trend findings,
/// which override local spikes.
#[derive(Debug, Clone)]
pub struct StreamingDetector {
    config: DetectorConfig,
}

impl StreamingDetector {
    /// Create a detector with the given configuration.
    pub fn new(config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Spike candidate: absolute z-score of the latest value, or None when
    /// it stays under the threshold. A zero-variance window scores 0.
    fn spike_score(&self, window: &WindowSnapshot, latest: f64, sigma: f64) -> f64 {
        if sigma == 0.0 {
            return 0.0;
        }
        (latest - window.mean) / sigma
    }

    /// Trend candidate: compares the least-squares slope over the last
    /// `trend_points` values with the slope over the horizon before it.
    /// A significant sign change yields the sigma-normalized slope swing.
    fn trend_shift(&self, window: &WindowSnapshot, sigma: f64) -> Option<f64> {
        let k = self.config.trend_points;
        let n = window.values.len();
        if n < 2 * k || sigma == 0.0 {
            return None;
        }

        let recent = least_squares_slope(&window.values[n - k..]);
        let prior = least_squares_slope(&window.values[n - 2 * k..n - k]);
        if recent * prior >= 0.0 {
            return None;
        }

        let horizon = (k - 1) as f64;
        let significant = |slope: f64| (slope.abs() * horizon) > self.config.trend_tolerance * sigma;
        if !significant(recent) || !significant(prior) {
            return None;
        }
        Some((recent - prior).abs() * horizon / sigma)
    }

    /// Seasonal candidate: deviation of the latest value from its same-phase
    /// baseline, in sigma units. Falls back to absolute deviation for
    /// zero-variance windows.
    fn seasonal_break(&self, window: &WindowSnapshot, latest: f64, sigma: f64) -> Option<f64> {
        let seasonal = window.seasonal.as_ref()?;
        if !seasonal.established {
            return None;
        }
        let denom = if sigma > 0.0 { sigma } else { 1.0 };
        let deviation = (latest - seasonal.baseline).abs() / denom;
        (deviation > self.config.seasonal_tolerance).then_some(deviation)
    }
}

impl PatternDetector for StreamingDetector {
    fn detect(&self, window: &WindowSnapshot) -> PatternResult {
        let computed_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let fingerprint = window.fingerprint();

        if window.len() < self.config.min_samples {
            return PatternResult {
                series_key: window.series_key.clone(),
                window_fingerprint: fingerprint,
                score: 0.0,
                classification: Classification::Normal,
                severity: Severity::None,
                insufficient_data: true,
                computed_at,
            };
        }

        let latest = window.latest().unwrap_or(0.0);
        let sigma = window.std_dev();
        let z = self.spike_score(window, latest, sigma);

        let (classification, score) = if let Some(deviation) = self.seasonal_break(window, latest, sigma) {
            (Classification::SeasonalBreak, deviation)
        } else if let Some(swing) = self.trend_shift(window, sigma) {
            (Classification::TrendShift, swing)
        } else if z.abs() >= self.config.z_threshold {
            (Classification::Spike, z.abs())
        } else {
            (Classification::Normal, z.abs())
        };

        let severity = if !classification.is_anomalous() {
            Severity::None
        } else if score > CRITICAL_SCORE {
            Severity::Critical
        } else {
            Severity::Warning
        };

        if classification.is_anomalous() {
            debug!(
                series = %window.series_key,
                %classification,
                score,
                "pattern detected"
            );
        }

        PatternResult {
            series_key: window.series_key.clone(),
            window_fingerprint: fingerprint,
            score,
            classification,
            severity,
            insufficient_data: false,
            computed_at,
        }
    }
}
