//! Engine counters.

use serde::{Deserialize, Serialize};

/// Monotonic counters snapshot, for observability endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    pub accepted: u64,
    pub rejected: u64,
    pub rate_limited: u64,
    pub detections: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub dispatch_drops: u64,
    pub live_series: u64,
}
