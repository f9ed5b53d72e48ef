//! Result cache trait definition.

use pattern_spi::PatternResult;

/// Cache of detection results keyed by series and validated by window
/// fingerprint.
///
/// Entries are returned by value and never shared mutably; a fingerprint
/// mismatch or an expired entry is a miss.
pub trait ResultCache: Send + Sync {
    /// Fetch the cached result for a series if it is fresh: unexpired and
    /// computed from the window state the caller's fingerprint describes.
    fn get(&self, series_key: &str, fingerprint: u64) -> Option<PatternResult>;

    /// Store a result, replacing any previous entry for the series.
    fn put(&self, result: PatternResult);

    /// Number of live entries.
    fn entry_count(&self) -> usize;
}
