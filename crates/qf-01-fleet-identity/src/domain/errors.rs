//! # Identity Errors
//!
//! Error types for clock, ledger and fleet identity operations.

use shared_types::{AgentSerial, DuplicateTimeslotError, SerialError, StoreError, Timeslot};
use thiserror::Error;

/// Errors that can occur in the fleet identity subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// An identity for this (serial, timeslot) already exists.
    #[error(transparent)]
    DuplicateTimeslot(#[from] DuplicateTimeslotError),

    /// Identity appended to the ledger of a different agent.
    #[error("Identity for {actual} cannot be appended to the ledger of {expected}")]
    SerialMismatch {
        expected: AgentSerial,
        actual: AgentSerial,
    },

    /// Agent is not part of the fleet roster.
    #[error("Unknown agent: {0}")]
    UnknownAgent(AgentSerial),

    /// The same serial appears twice in the roster.
    #[error("Duplicate agent in roster: {0}")]
    DuplicateAgent(AgentSerial),

    /// Fleet roster has no agents.
    #[error("Fleet roster is empty")]
    EmptyRoster,

    /// Invalid serial while building the roster.
    #[error(transparent)]
    InvalidSerial(#[from] SerialError),

    /// The 64-bit timeslot counter cannot advance further.
    #[error("Timeslot counter exhausted")]
    TimeslotExhausted,

    /// Tried to establish a timeslot the clock has not issued.
    #[error("Timeslot {timeslot} has not been issued (current {current})")]
    TimeslotNotIssued { timeslot: Timeslot, current: Timeslot },

    /// Persistence failure. Fatal to the current operation.
    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for IdentityError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateTimeslot(dup) => IdentityError::DuplicateTimeslot(dup),
            other => IdentityError::Store(other),
        }
    }
}

/// Result type for identity operations
pub type IdentityResult<T> = Result<T, IdentityError>;
