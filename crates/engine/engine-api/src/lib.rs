//! Pattern Engine API
//!
//! Configuration types for the cache, admission control, dispatch queue,
//! and the engine that composes them.

use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use engine_spi::{
    AdmissionControl, DispatchItem, EngineError, EngineStats, IngestOutcome, OperationKind,
    QueryOutcome, Result, ResultCache,
};
// Re-export the sibling configs the engine composes
pub use pattern_api::DetectorConfig;
pub use series_api::WindowConfig;

/// Result cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Seconds a cached result stays valid (default: 1800).
    pub ttl_secs: u64,
    /// Maximum live entries before LRU eviction (default: 1024).
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 1800,
            capacity: 1024,
        }
    }
}

/// Token-bucket limits per operation kind.
///
/// Capacity is the burst size; refill is tokens per second.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    pub ingest_capacity: f64,
    pub ingest_refill_per_sec: f64,
    pub query_capacity: f64,
    pub query_refill_per_sec: f64,
    /// Seconds of inactivity before a bucket may be reaped (default: 3600).
    pub reap_idle_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        // 100 calls per minute per client for both kinds.
        Self {
            ingest_capacity: 100.0,
            ingest_refill_per_sec: 100.0 / 60.0,
            query_capacity: 100.0,
            query_refill_per_sec: 100.0 / 60.0,
            reap_idle_secs: 3600,
        }
    }
}

impl RateLimitConfig {
    /// Bucket parameters for one operation kind.
    pub fn bucket_for(&self, kind: OperationKind) -> (f64, f64) {
        match kind {
            OperationKind::Ingest => (self.ingest_capacity, self.ingest_refill_per_sec),
            OperationKind::Query => (self.query_capacity, self.query_refill_per_sec),
        }
    }
}

/// Dispatch queue configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Maximum queued items before the oldest is dropped (default: 256).
    pub capacity: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self { capacity: 256 }
    }
}

/// Full engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub window: WindowConfig,
    pub detector: DetectorConfig,
    pub cache: CacheConfig,
    pub limits: RateLimitConfig,
    pub queue: QueueConfig,
    /// Run detection every N accepted observations per series (default: 1).
    pub detect_interval: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            detector: DetectorConfig::default(),
            cache: CacheConfig::default(),
            limits: RateLimitConfig::default(),
            queue: QueueConfig::default(),
            detect_interval: 1,
        }
    }
}

impl EngineConfig {
    /// Check parameter ranges across all components.
    pub fn validate(&self) -> Result<()> {
        if self.window.capacity == 0 {
            return Err(EngineError::InvalidConfig {
                name: "window.capacity".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if self.cache.capacity == 0 {
            return Err(EngineError::InvalidConfig {
                name: "cache.capacity".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if self.queue.capacity == 0 {
            return Err(EngineError::InvalidConfig {
                name: "queue.capacity".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if self.detect_interval == 0 {
            return Err(EngineError::InvalidConfig {
                name: "detect_interval".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        for (name, value) in [
            ("limits.ingest_capacity", self.limits.ingest_capacity),
            ("limits.ingest_refill_per_sec", self.limits.ingest_refill_per_sec),
            ("limits.query_capacity", self.limits.query_capacity),
            ("limits.query_refill_per_sec", self.limits.query_refill_per_sec),
        ] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(EngineError::InvalidConfig {
                    name: name.to_string(),
                    reason: "must be positive and finite".to_string(),
                });
            }
        }
        self.detector.validate().map_err(|e| EngineError::InvalidConfig {
            name: "detector".to_string(),
            reason: e.to_string(),
        })?;
        Ok(())
    }
}
