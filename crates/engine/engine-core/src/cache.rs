//! TTL + LRU result cache.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::trace;

use engine_api::CacheConfig;
use engine_spi::ResultCache;
use pattern_spi::PatternResult;

#[derive(Debug, Clone)]
struct CacheEntry {
    result: PatternResult,
    expires_at: Instant,
    last_access: Instant,
}

/// Sharded result cache with TTL-first, then LRU eviction.
///
/// At most one live entry exists per series key; a stored result is served
/// only while the caller's window fingerprint still matches it. Expired
/// entries are never returned and are reclaimed before any LRU victim is
/// chosen.
pub struct PatternCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl PatternCache {
    /// Create a cache with the given TTL and capacity.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: DashMap::new(),
            ttl: Duration::from_secs(config.ttl_secs),
            capacity: config.capacity.max(1),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Deterministic-clock lookup; `get` delegates here with `Instant::now`.
    pub fn get_at(&self, series_key: &str, fingerprint: u64, now: Instant) -> Option<PatternResult> {
        let hit = match self.entries.get_mut(series_key) {
            Some(mut entry) => {
                if entry.expires_at <= now {
                    drop(entry);
                    self.entries.remove(series_key);
                    None
                } else if entry.result.window_fingerprint != fingerprint {
                    None
                } else {
                    entry.last_access = now;
                    Some(entry.result.clone())
                }
            }
            None => None,
        };
        match &hit {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        hit
    }

    /// Deterministic-clock store; `put` delegates here with `Instant::now`.
    pub fn put_at(&self, result: PatternResult, now: Instant) {
        let key = result.series_key.clone();
        let entry = CacheEntry {
            result,
            expires_at: now + self.ttl,
            last_access: now,
        };
        self.entries.insert(key, entry);
        if self.entries.len() > self.capacity {
            self.reclaim(now);
        }
    }

    /// Drop expired entries, then LRU victims until back under capacity.
    fn reclaim(&self, now: Instant) {
        self.entries.retain(|_, entry| entry.expires_at > now);
        while self.entries.len() > self.capacity {
            // Copy out the victim key so no shard guard is held across the
            // scan or the removal.
            let mut victim: Option<(String, Instant)> = None;
            for entry in self.entries.iter() {
                let beats = victim
                    .as_ref()
                    .map_or(true, |(_, access)| entry.last_access < *access);
                if beats {
                    victim = Some((entry.key().clone(), entry.last_access));
                }
            }
            match victim {
                Some((key, _)) => {
                    trace!(series = %key, "evicting cache entry");
                    self.entries.remove(&key);
                }
                None => break,
            }
        }
    }

    /// Cache hits since construction.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Cache misses since construction.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

impl ResultCache for PatternCache {
    fn get(&self, series_key: &str, fingerprint: u64) -> Option<PatternResult> {
        self.get_at(series_key, fingerprint, Instant::now())
    }

    fn put(&self, result: PatternResult) {
        self.put_at(result, Instant::now());
    }

    fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pattern_spi::{Classification, Severity};

    fn result(key: &str, fingerprint: u64) -> PatternResult {
        PatternResult {
            series_key: key.to_string(),
            window_fingerprint: fingerprint,
            score: 0.0,
            classification: Classification::Normal,
            severity: Severity::None,
            insufficient_data: false,
            computed_at: 0,
        }
    }

    fn cache(ttl_secs: u64, capacity: usize) -> PatternCache {
        PatternCache::new(CacheConfig { ttl_secs, capacity })
    }

    #[test]
    fn test_hit_requires_matching_fingerprint() {
        let cache = cache(60, 8);
        let t0 = Instant::now();
        cache.put_at(result("a", 1), t0);

        assert!(cache.get_at("a", 1, t0).is_some());
        assert!(cache.get_at("a", 2, t0).is_none());
    }

    #[test]
    fn test_expired_entry_is_never_returned() {
        let cache = cache(1, 8);
        let t0 = Instant::now();
        cache.put_at(result("a", 1), t0);

        assert!(cache.get_at("a", 1, t0 + Duration::from_millis(500)).is_some());
        assert!(cache.get_at("a", 1, t0 + Duration::from_secs(2)).is_none());
        assert_eq!(cache.entry_count(), 0);
    }

    #[test]
    fn test_put_replaces_previous_entry_for_key() {
        let cache = cache(60, 8);
        let t0 = Instant::now();
        cache.put_at(result("a", 1), t0);
        cache.put_at(result("a", 2), t0 + Duration::from_secs(1));

        assert_eq!(cache.entry_count(), 1);
        assert!(cache.get_at("a", 1, t0 + Duration::from_secs(2)).is_none());
        assert!(cache.get_at("a", 2, t0 + Duration::from_secs(2)).is_some());
    }

    #[test]
    fn test_capacity_is_never_exceeded() {
        let cache = cache(60, 3);
        let t0 = Instant::now();
        for i in 0..10u64 {
            cache.put_at(result(&format!("k{i}"), i), t0 + Duration::from_secs(i));
        }
        assert!(cache.entry_count() <= 3);
    }

    #[test]
    fn test_lru_victim_is_least_recently_used() {
        let cache = cache(60, 2);
        let t0 = Instant::now();
        cache.put_at(result("a", 1), t0);
        cache.put_at(result("b", 1), t0 + Duration::from_secs(1));
        // Touch "a" so "b" becomes the LRU victim.
        assert!(cache.get_at("a", 1, t0 + Duration::from_secs(2)).is_some());
        cache.put_at(result("c", 1), t0 + Duration::from_secs(3));

        assert!(cache.get_at("a", 1, t0 + Duration::from_secs(4)).is_some());
        assert!(cache.get_at("b", 1, t0 + Duration::from_secs(4)).is_none());
        assert!(cache.get_at("c", 1, t0 + Duration::from_secs(4)).is_some());
    }

    #[test]
    fn test_expired_entries_reclaimed_before_lru() {
        let cache = cache(2, 2);
        let t0 = Instant::now();
        cache.put_at(result("old", 1), t0);
        // "fresh" is written later with its own TTL window.
        cache.put_at(result("fresh", 1), t0 + Duration::from_secs(3));
        // "old" has expired by now; adding a third entry must reclaim it,
        // not the more recently used "fresh".
        cache.put_at(result("new", 1), t0 + Duration::from_secs(4));

        assert!(cache.get_at("fresh", 1, t0 + Duration::from_secs(4)).is_some());
        assert!(cache.get_at("new", 1, t0 + Duration::from_secs(4)).is_some());
        assert!(cache.get_at("old", 1, t0 + Duration::from_secs(4)).is_none());
    }
}
