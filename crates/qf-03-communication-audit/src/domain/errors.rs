//! Audit error types.

use shared_types::{RecordId, StoreError};
use thiserror::Error;

/// Errors that can occur in the communication audit subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuditError {
    /// No logged record with this id.
    #[error("Communication {0} not found")]
    NotFound(RecordId),

    /// Persistence failure. Fatal to the current operation.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for audit operations
pub type AuditResult<T> = Result<T, AuditError>;
