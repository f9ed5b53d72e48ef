//! Token-bucket admission control.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::trace;

use engine_api::RateLimitConfig;
use engine_spi::{AdmissionControl, OperationKind};

/// One refillable bucket.
///
/// Refill is computed lazily from elapsed time at check time; no background
/// timer is involved. Token counts never go negative and never exceed
/// capacity.
#[derive(Debug, Clone)]
pub struct TokenBucket {
    tokens: f64,
    last_refill: Instant,
    capacity: f64,
    refill_rate: f64,
}

impl TokenBucket {
    /// Create a full bucket.
    pub fn new(capacity: f64, refill_rate: f64, now: Instant) -> Self {
        Self {
            tokens: capacity,
            last_refill: now,
            capacity,
            refill_rate,
        }
    }

    /// Consume one token if available, refilling for elapsed time first.
    pub fn allow_at(&mut self, now: Instant) -> bool {
        let elapsed = now.saturating_duration_since(self.last_refill);
        self.tokens = (self.tokens + elapsed.as_secs_f64() * self.refill_rate).min(self.capacity);
        self.last_refill = now;
        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Tokens currently available.
    pub fn tokens(&self) -> f64 {
        self.tokens
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct BucketKey {
    client: String,
    kind: OperationKind,
}

/// Per-(client, kind) token buckets behind a sharded map.
///
/// Buckets are created full on first contact and only ever mutated under
/// their own shard lock; unrelated clients never contend.
pub struct AdmissionController {
    buckets: DashMap<BucketKey, TokenBucket>,
    config: RateLimitConfig,
}

impl AdmissionController {
    /// Create a controller with the given limits.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            buckets: DashMap::new(),
            config,
        }
    }

    /// Deterministic-clock check; `allow` delegates here with `Instant::now`.
    pub fn allow_at(&self, client_id: &str, kind: OperationKind, now: Instant) -> bool {
        let key = BucketKey {
            client: client_id.to_string(),
            kind,
        };
        let mut bucket = self.buckets.entry(key).or_insert_with(|| {
            let (capacity, refill) = self.config.bucket_for(kind);
            TokenBucket::new(capacity, refill, now)
        });
        let allowed = bucket.allow_at(now);
        if !allowed {
            trace!(client = client_id, %kind, "admission denied");
        }
        allowed
    }

    /// Number of live buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Drop buckets idle longer than `max_idle`. Returns how many were
    /// removed; they are recreated full on next contact.
    pub fn reap_idle(&self, max_idle: Duration, now: Instant) -> usize {
        let before = self.buckets.len();
        self.buckets
            .retain(|_, bucket| now.saturating_duration_since(bucket.last_refill) <= max_idle);
        before.saturating_sub(self.buckets.len())
    }
}

impl AdmissionControl for AdmissionController {
    fn allow(&self, client_id: &str, kind: OperationKind) -> bool {
        self.allow_at(client_id, kind, Instant::now())
    }
}
