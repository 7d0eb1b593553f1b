//! # Identity Ledger
//!
//! Per-agent append-only view over the identity store. The store is the
//! system of record; the ledger holds no history of its own.

use shared_types::{AgentSerial, Identity, Timeslot};
use std::sync::Arc;
use tracing::debug;

use super::errors::{IdentityError, IdentityResult};
use crate::ports::outbound::IdentityStore;

/// Append-only identity history of one agent.
pub struct IdentityLedger<S: IdentityStore + ?Sized> {
    serial: AgentSerial,
    store: Arc<S>,
}

impl<S: IdentityStore + ?Sized> IdentityLedger<S> {
    /// Ledger for `serial` backed by `store`.
    pub fn new(serial: AgentSerial, store: Arc<S>) -> Self {
        Self { serial, store }
    }

    /// Agent this ledger belongs to.
    pub fn serial(&self) -> &AgentSerial {
        &self.serial
    }

    /// Append an identity.
    ///
    /// # Errors
    /// * `IdentityError::DuplicateTimeslot` - (serial, timeslot) already recorded;
    ///   the existing identity is left untouched
    /// * `IdentityError::SerialMismatch` - identity belongs to another agent
    pub async fn append(&self, identity: Identity) -> IdentityResult<()> {
        if identity.serial != self.serial {
            return Err(IdentityError::SerialMismatch {
                expected: self.serial.clone(),
                actual: identity.serial,
            });
        }

        let timeslot = identity.timeslot;
        self.store.put(identity).await?;
        debug!(serial = %self.serial, %timeslot, "[qf-01] identity appended");
        Ok(())
    }

    /// Most recent identity, or `None` before the first append.
    pub async fn current(&self) -> IdentityResult<Option<Identity>> {
        Ok(self.store.latest(&self.serial).await?)
    }

    /// All identities, ordered by timeslot ascending.
    pub async fn history(&self) -> IdentityResult<Vec<Identity>> {
        Ok(self.store.history(&self.serial).await?)
    }

    /// Identity for one timeslot.
    pub async fn at(&self, timeslot: Timeslot) -> IdentityResult<Option<Identity>> {
        Ok(self.store.get(&self.serial, timeslot).await?)
    }
}
