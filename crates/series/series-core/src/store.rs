//! Sharded per-key window store.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::debug;

use series_api::WindowConfig;
use series_spi::{Observation, Result, SeriesError, SeriesStore, WindowSnapshot};

use crate::window::SeriesWindow;

struct Entry {
    window: SeriesWindow,
    last_seen: Instant,
}

/// In-memory series store backed by a sharded concurrent map.
///
/// Each key owns an independently locked window record; appends to one key
/// serialize on its shard while unrelated keys proceed in parallel. There is
/// no global lock and no persistent backing; state is lost on restart by
/// design.
pub struct InMemorySeriesStore {
    windows: DashMap<String, Entry>,
    config: WindowConfig,
}

impl InMemorySeriesStore {
    /// Create a store with the given window configuration.
    pub fn new(config: WindowConfig) -> Self {
        Self {
            windows: DashMap::new(),
            config,
        }
    }

    /// The window configuration this store applies to new series.
    pub fn config(&self) -> &WindowConfig {
        &self.config
    }
}

impl SeriesStore for InMemorySeriesStore {
    fn append(&self, observation: Observation) -> Result<WindowSnapshot> {
        if !observation.value.is_finite() {
            return Err(SeriesError::InvalidValue {
                series: observation.series_key,
                value: observation.value,
            });
        }

        let mut entry = self
            .windows
            .entry(observation.series_key.clone())
            .or_insert_with(|| {
                debug!(series = %observation.series_key, "creating series window");
                Entry {
                    window: SeriesWindow::new(&observation.series_key, &self.config),
                    last_seen: Instant::now(),
                }
            });
        entry.window.append(observation.timestamp, observation.value)?;
        entry.last_seen = Instant::now();
        Ok(entry.window.snapshot())
    }

    fn snapshot(&self, series_key: &str) -> Option<WindowSnapshot> {
        self.windows.get(series_key).map(|e| e.window.snapshot())
    }

    fn series_count(&self) -> usize {
        self.windows.len()
    }

    fn evict_idle(&self, max_idle: Duration) -> usize {
        let before = self.windows.len();
        self.windows.retain(|_, entry| entry.last_seen.elapsed() <= max_idle);
        let removed = before.saturating_sub(self.windows.len());
        if removed > 0 {
            debug!(removed, "evicted idle series windows");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> InMemorySeriesStore {
        InMemorySeriesStore::new(WindowConfig::new(16))
    }

    #[test]
    fn test_first_observation_creates_window() {
        let store = store();
        let snap = store.append(Observation::new("mem.free", 1, 512.0)).unwrap();
        assert_eq!(snap.len(), 1);
        assert_eq!(snap.accepted, 1);
        assert_eq!(store.series_count(), 1);
    }

    #[test]
    fn test_keys_are_independent() {
        let store = store();
        store.append(Observation::new("a", 10, 1.0)).unwrap();
        store.append(Observation::new("b", 5, 2.0)).unwrap();

        // b's earlier timestamp is fine; ordering is per key.
        assert_eq!(store.snapshot("a").unwrap().last_timestamp, 10);
        assert_eq!(store.snapshot("b").unwrap().last_timestamp, 5);
    }

    #[test]
    fn test_snapshot_missing_key_is_none() {
        assert!(store().snapshot("nope").is_none());
    }

    #[test]
    fn test_invalid_value_does_not_create_window() {
        let store = store();
        assert!(store.append(Observation::new("a", 0, f64::NAN)).is_err());
        assert_eq!(store.series_count(), 0);
    }

    #[test]
    fn test_evict_idle_removes_stale_windows() {
        let store = store();
        store.append(Observation::new("a", 0, 1.0)).unwrap();
        store.append(Observation::new("b", 0, 1.0)).unwrap();
        assert_eq!(store.evict_idle(Duration::ZERO), 2);
        assert_eq!(store.series_count(), 0);
    }
}
