//! Data models for the pattern engine.
//!
//! This module contains the outcome types callers see and the items handed
//! to the downstream dispatch consumer.

mod dispatch_item;
mod operation;
mod outcome;
mod stats;

pub use dispatch_item::DispatchItem;
pub use operation::OperationKind;
pub use outcome::{IngestOutcome, QueryOutcome};
pub use stats::EngineStats;
