//! Series Window Store Core
//!
//! Ring-buffer windows with incrementally maintained rolling statistics and
//! the sharded per-key store that owns them.

mod store;
mod window;

pub use store::InMemorySeriesStore;
pub use window::SeriesWindow;
