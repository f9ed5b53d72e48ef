//! Engine orchestration: admission, append, detect, cache, dispatch.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use tracing::{debug, info};

use engine_api::EngineConfig;
use engine_spi::{
    AdmissionControl, DispatchItem, EngineError, EngineStats, IngestOutcome, OperationKind,
    QueryOutcome, Result, ResultCache,
};
use pattern_core::StreamingDetector;
use pattern_spi::{PatternDetector, PatternResult};
use series_core::InMemorySeriesStore;
use series_spi::{Observation, SeriesStore, WindowSnapshot};

use crate::cache::PatternCache;
use crate::dispatch::DispatchQueue;
use crate::gate::AdmissionController;

/// The streaming pattern-detection engine.
///
/// Composes the series store, streaming detector, result cache, admission
/// controller, and dispatch queue behind two operations: `ingest` and
/// `query`. All per-call failures are explicit outcome variants; no input
/// can panic the engine.
pub struct PatternEngine {
    store: InMemorySeriesStore,
    detector: StreamingDetector,
    cache: PatternCache,
    gate: AdmissionController,
    queue: DispatchQueue,
    config: EngineConfig,
    accepted: AtomicU64,
    rejected: AtomicU64,
    rate_limited: AtomicU64,
    detections: AtomicU64,
}

impl PatternEngine {
    /// Build an engine from a validated configuration.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let detector =
            StreamingDetector::new(config.detector.clone()).map_err(|e| EngineError::InvalidConfig {
                name: "detector".to_string(),
                reason: e.to_string(),
            })?;
        info!(
            window_capacity = config.window.capacity,
            cache_capacity = config.cache.capacity,
            queue_capacity = config.queue.capacity,
            detect_interval = config.detect_interval,
            "pattern engine ready"
        );
        Ok(Self {
            store: InMemorySeriesStore::new(config.window.clone()),
            detector,
            cache: PatternCache::new(config.cache.clone()),
            gate: AdmissionController::new(config.limits.clone()),
            queue: DispatchQueue::new(config.queue.clone()),
            config,
            accepted: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            rate_limited: AtomicU64::new(0),
            detections: AtomicU64::new(0),
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Ingest one observation for a series on behalf of a client.
    pub fn ingest(
        &self,
        client_id: &str,
        series_key: &str,
        timestamp: i64,
        value: f64,
    ) -> IngestOutcome {
        if !self.gate.allow(client_id, OperationKind::Ingest) {
            self.rate_limited.fetch_add(1, Ordering::Relaxed);
            return IngestOutcome::RateLimited;
        }

        let snapshot = match self
            .store
            .append(Observation::new(series_key, timestamp, value))
        {
            Ok(snapshot) => snapshot,
            Err(error) => {
                self.rejected.fetch_add(1, Ordering::Relaxed);
                debug!(series = series_key, %error, "observation rejected");
                return IngestOutcome::Rejected(error);
            }
        };
        self.accepted.fetch_add(1, Ordering::Relaxed);

        let detection = if snapshot.accepted % self.config.detect_interval == 0 {
            let result = self.run_detection(&snapshot);
            self.queue.enqueue(DispatchItem::new(result.clone()));
            Some(result)
        } else {
            None
        };

        IngestOutcome::Accepted {
            series_key: series_key.to_string(),
            window_len: snapshot.len(),
            detection,
        }
    }

    /// Query the current pattern classification for a series.
    pub fn query(&self, client_id: &str, series_key: &str) -> QueryOutcome {
        if !self.gate.allow(client_id, OperationKind::Query) {
            self.rate_limited.fetch_add(1, Ordering::Relaxed);
            return QueryOutcome::RateLimited;
        }

        let Some(snapshot) = self.store.snapshot(series_key) else {
            return QueryOutcome::NotFound;
        };

        let fingerprint = snapshot.fingerprint();
        if let Some(hit) = self.cache.get(series_key, fingerprint) {
            return QueryOutcome::Found(hit);
        }
        QueryOutcome::Found(self.run_detection(&snapshot))
    }

    fn run_detection(&self, snapshot: &WindowSnapshot) -> PatternResult {
        let result = self.detector.detect(snapshot);
        self.detections.fetch_add(1, Ordering::Relaxed);
        self.cache.put(result.clone());
        result
    }

    /// Receiver handle for the external delivery worker.
    pub fn dispatch_receiver(&self) -> Receiver<DispatchItem> {
        self.queue.receiver()
    }

    /// Pop the oldest queued dispatch item, if any.
    pub fn try_next_dispatch(&self) -> Option<DispatchItem> {
        self.queue.try_next()
    }

    /// Counters snapshot.
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            accepted: self.accepted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            rate_limited: self.rate_limited.load(Ordering::Relaxed),
            detections: self.detections.load(Ordering::Relaxed),
            cache_hits: self.cache.hits(),
            cache_misses: self.cache.misses(),
            dispatch_drops: self.queue.drops(),
            live_series: self.store.series_count() as u64,
        }
    }

    /// Housekeeping sweep: evict idle windows and reap idle buckets.
    /// Returns (windows evicted, buckets reaped).
    pub fn maintain(&self) -> (usize, usize) {
        let evicted = self
            .store
            .evict_idle(Duration::from_secs(self.config.window.idle_eviction_secs));
        let reaped = self.gate.reap_idle(
            Duration::from_secs(self.config.limits.reap_idle_secs),
            Instant::now(),
        );
        (evicted, reaped)
    }
}
