//! Runtime error types.

use qf_01_fleet_identity::IdentityError;
use qf_03_communication_audit::AuditError;
use shared_types::{AgentSerial, StoreError};
use thiserror::Error;

use crate::container::ConfigError;

/// Errors surfaced by the fleet runtime and messenger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Configuration rejected at startup.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Identity subsystem failure.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// Audit subsystem failure.
    #[error(transparent)]
    Audit(#[from] AuditError),

    /// Store failure outside a subsystem call.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Agent has no identity at the established timeslot (no advance has
    /// completed yet).
    #[error("Agent {serial} has no current identity")]
    NoCurrentIdentity { serial: AgentSerial },
}

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;
