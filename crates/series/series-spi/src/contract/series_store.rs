//! Series store trait definition.

use std::time::Duration;

use crate::error::Result;
use crate::model::{Observation, WindowSnapshot};

/// Per-key windowed series storage.
///
/// Implementations own all mutable per-series state; callers only ever see
/// immutable snapshots. Appends to the same key are serialized, different
/// keys proceed in parallel.
pub trait SeriesStore: Send + Sync {
    /// Append an observation to its series, creating the window on first
    /// contact, and return a snapshot of the window after the append.
    ///
    /// Rejects out-of-order timestamps and non-finite values without
    /// mutating any state.
    fn append(&self, observation: Observation) -> Result<WindowSnapshot>;

    /// Snapshot the current window for a key, if one exists.
    fn snapshot(&self, series_key: &str) -> Option<WindowSnapshot>;

    /// Number of live series windows.
    fn series_count(&self) -> usize;

    /// Drop windows that have not accepted an observation within `max_idle`.
    /// Returns the number of windows removed.
    fn evict_idle(&self, max_idle: Duration) -> usize;
}
