//! Pattern Engine Core
//!
//! The result cache, token-bucket admission controller, bounded dispatch
//! queue, and the engine that orchestrates them over the series store and
//! streaming detector.

mod cache;
mod dispatch;
mod engine;
mod gate;

pub use cache::PatternCache;
pub use dispatch::DispatchQueue;
pub use engine::PatternEngine;
pub use gate::{AdmissionController, TokenBucket};
