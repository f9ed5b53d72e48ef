//! Items handed to the downstream dispatch consumer.

use serde::{Deserialize, Serialize};

use pattern_spi::PatternResult;

/// One detection result queued for downstream delivery.
///
/// Delivery is at-least-attempted and possibly dropped under pressure,
/// never exactly-once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchItem {
    pub series_key: String,
    pub result: PatternResult,
}

impl DispatchItem {
    pub fn new(result: PatternResult) -> Self {
        Self {
            series_key: result.series_key.clone(),
            result,
        }
    }
}
