//! Ring-buffer series window with rolling statistics.

use std::collections::VecDeque;

use series_api::WindowConfig;
use series_spi::{Observation, Result, SeasonalContext, SeriesError, WindowSnapshot};

/// Blend factor when folding a completed period into the phase baselines.
const BASELINE_BLEND: f64 = 0.3;

/// Per-phase seasonal baselines, folded only when a full period completes.
///
/// The baseline a value is compared against therefore never includes the
/// period the value itself belongs to.
#[derive(Debug, Clone)]
struct SeasonalState {
    period: usize,
    baselines: Vec<f64>,
    seen_periods: u32,
    current: Vec<f64>,
}

impl SeasonalState {
    fn new(period: usize) -> Self {
        Self {
            period,
            baselines: Vec::new(),
            seen_periods: 0,
            current: Vec::with_capacity(period),
        }
    }

    fn observe(&mut self, value: f64) {
        if self.current.len() == self.period {
            self.fold();
        }
        self.current.push(value);
    }

    fn fold(&mut self) {
        if self.seen_periods == 0 {
            self.baselines = self.current.clone();
        } else {
            for (baseline, value) in self.baselines.iter_mut().zip(&self.current) {
                *baseline = BASELINE_BLEND * value + (1.0 - BASELINE_BLEND) * *baseline;
            }
        }
        self.seen_periods += 1;
        self.current.clear();
    }

    fn context(&self) -> Option<SeasonalContext> {
        let phase = self.current.len().checked_sub(1)?;
        Some(SeasonalContext {
            period: self.period,
            phase,
            baseline: self.baselines.get(phase).copied().unwrap_or(0.0),
            established: self.seen_periods >= 2,
        })
    }
}

/// Fixed-capacity window over one series plus rolling aggregates.
///
/// Mean and variance are maintained with Welford updates on append and the
/// matching reverse update when the oldest point is evicted, so aggregates
/// always agree with the retained buffer contents.
#[derive(Debug, Clone)]
pub struct SeriesWindow {
    series_key: String,
    capacity: usize,
    values: VecDeque<f64>,
    timestamps: VecDeque<i64>,
    accepted: u64,
    last_timestamp: i64,
    mean: f64,
    m2: f64,
    seasonal: Option<SeasonalState>,
}

impl SeriesWindow {
    /// Create an empty window for a series.
    pub fn new(series_key: impl Into<String>, config: &WindowConfig) -> Self {
        let capacity = config.capacity.max(1);
        Self {
            series_key: series_key.into(),
            capacity,
            values: VecDeque::with_capacity(capacity),
            timestamps: VecDeque::with_capacity(capacity),
            accepted: 0,
            last_timestamp: i64::MIN,
            mean: 0.0,
            m2: 0.0,
            seasonal: config
                .seasonal_period
                .filter(|&p| p >= 2)
                .map(SeasonalState::new),
        }
    }

    /// Append one observation, evicting the oldest point at capacity.
    ///
    /// Rejects non-finite values and timestamps older than the last accepted
    /// one; the failing path mutates nothing.
    pub fn append(&mut self, timestamp: i64, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(SeriesError::InvalidValue {
                series: self.series_key.clone(),
                value,
            });
        }
        if self.accepted > 0 && timestamp < self.last_timestamp {
            return Err(SeriesError::OutOfOrder {
                series: self.series_key.clone(),
                last: self.last_timestamp,
                got: timestamp,
            });
        }

        if self.values.len() == self.capacity {
            if let Some(oldest) = self.values.pop_front() {
                self.timestamps.pop_front();
                self.remove_from_stats(oldest);
            }
        }

        self.values.push_back(value);
        self.timestamps.push_back(timestamp);
        self.add_to_stats(value);
        self.accepted += 1;
        self.last_timestamp = timestamp;
        if let Some(seasonal) = self.seasonal.as_mut() {
            seasonal.observe(value);
        }
        Ok(())
    }

    fn add_to_stats(&mut self, value: f64) {
        let n = self.values.len() as f64;
        let delta = value - self.mean;
        self.mean += delta / n;
        self.m2 += delta * (value - self.mean);
    }

    fn remove_from_stats(&mut self, value: f64) {
        let remaining = self.values.len() as f64;
        if remaining == 0.0 {
            self.mean = 0.0;
            self.m2 = 0.0;
            return;
        }
        let old_mean = self.mean;
        self.mean = old_mean - (value - old_mean) / remaining;
        self.m2 = (self.m2 - (value - self.mean) * (value - old_mean)).max(0.0);
    }

    /// Number of retained values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no values are retained.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Total observations accepted over the window's lifetime.
    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    /// Rolling population variance of the retained values.
    pub fn variance(&self) -> f64 {
        let n = self.values.len();
        if n < 2 {
            return 0.0;
        }
        (self.m2 / n as f64).max(0.0)
    }

    /// Take an immutable value-copy of the window state.
    pub fn snapshot(&self) -> WindowSnapshot {
        WindowSnapshot {
            series_key: self.series_key.clone(),
            values: self.values.iter().copied().collect(),
            first_timestamp: self.timestamps.front().copied().unwrap_or(0),
            last_timestamp: self.timestamps.back().copied().unwrap_or(0),
            accepted: self.accepted,
            mean: if self.values.is_empty() { 0.0 } else { self.mean },
            variance: self.variance(),
            seasonal: self.seasonal.as_ref().and_then(SeasonalState::context),
        }
    }
}
