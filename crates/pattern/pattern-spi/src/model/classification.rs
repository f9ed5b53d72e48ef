//! Pattern classifications.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of a window's latest behavior.
///
/// When several conditions fire at once, seasonal context overrides local
/// noise: SeasonalBreak > TrendShift > Spike > Normal. Exactly one
/// classification is ever reported per detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// Nothing unusual about the latest value.
    Normal,
    /// Latest value deviates sharply from the rolling mean.
    Spike,
    /// Short-horizon trend reversed direction significantly.
    TrendShift,
    /// Latest value broke from its same-phase seasonal baseline.
    SeasonalBreak,
}

impl Classification {
    /// True for any non-Normal classification.
    pub fn is_anomalous(&self) -> bool {
        !matches!(self, Classification::Normal)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Classification::Normal => "normal",
            Classification::Spike => "spike",
            Classification::TrendShift => "trend_shift",
            Classification::SeasonalBreak => "seasonal_break",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        assert_eq!(Classification::Normal.to_string(), "normal");
        assert_eq!(Classification::SeasonalBreak.to_string(), "seasonal_break");
    }

    #[test]
    fn test_is_anomalous() {
        assert!(!Classification::Normal.is_anomalous());
        assert!(Classification::Spike.is_anomalous());
        assert!(Classification::TrendShift.is_anomalous());
        assert!(Classification::SeasonalBreak.is_anomalous());
    }
}
