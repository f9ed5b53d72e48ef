//! Pattern detector trait definition.

use series_spi::WindowSnapshot;

use crate::model::PatternResult;

/// Pattern detector trait.
///
/// Detection is a pure function of the snapshot it is given: no hidden
/// shared mutable state and safe to invoke concurrently across keys. It
/// never fails; degenerate inputs (empty, constant, or single-sample
/// windows) produce a Normal result rather than an error.
pub trait PatternDetector: Send + Sync {
    /// Classify the latest behavior of a window snapshot.
    fn detect(&self, window: &WindowSnapshot) -> PatternResult;
}
