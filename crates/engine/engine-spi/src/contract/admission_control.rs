//! Admission control trait definition.

use crate::model::OperationKind;

/// Token-bucket style admission control.
///
/// A denied call is rejected outright, never queued; retrying is the
/// caller's decision.
pub trait AdmissionControl: Send + Sync {
    /// Consume one token from the (client, kind) bucket if available.
    fn allow(&self, client_id: &str, kind: OperationKind) -> bool;
}
