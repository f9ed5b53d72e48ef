//! Operation kinds gated by admission control.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of operation a client is attempting.
///
/// Each kind gets its own token bucket per client, so a burst of queries
/// cannot starve ingestion admission or vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    Ingest,
    Query,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Ingest => write!(f, "ingest"),
            OperationKind::Query => write!(f, "query"),
        }
    }
}
