//! # Error Types
//!
//! Defines error types used across subsystems.

use thiserror::Error;

use crate::entities::{AgentSerial, Timeslot};

/// Invalid agent serial.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerialError {
    /// Serials must be non-empty.
    #[error("Agent serial must not be empty")]
    Empty,
}

/// An identity for this (serial, timeslot) already exists.
///
/// Recoverable: callers treat it as "already exists" and may skip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Identity already exists for {serial} at timeslot {timeslot}")]
pub struct DuplicateTimeslotError {
    /// Agent whose identity was rejected.
    pub serial: AgentSerial,
    /// Timeslot already occupied.
    pub timeslot: Timeslot,
}

/// Errors raised by identity and communication stores.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Insert-if-absent found an existing row.
    #[error(transparent)]
    DuplicateTimeslot(#[from] DuplicateTimeslotError),

    /// Backend could not be reached; nothing was written.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Whether this is the recoverable duplicate case.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, StoreError::DuplicateTimeslot(_))
    }
}
