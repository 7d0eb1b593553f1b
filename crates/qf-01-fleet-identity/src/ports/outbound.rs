//! # Outbound Ports (Driven Ports / SPI)
//!
//! Traits that define dependencies this subsystem needs.

use async_trait::async_trait;
use shared_types::{AgentSerial, BadgeSeed, Identity, StoreError, Timeslot};

/// Persistent identity store. The system of record for every ledger.
///
/// Every write is all-or-nothing: a failed `put` leaves no partial row.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Atomic insert-if-absent on (serial, timeslot).
    ///
    /// # Errors
    /// * `StoreError::DuplicateTimeslot` - a row for the key already exists
    /// * `StoreError::Unavailable` - backend unreachable, nothing written
    async fn put(&self, identity: Identity) -> Result<(), StoreError>;

    /// Identity for an exact (serial, timeslot).
    async fn get(
        &self,
        serial: &AgentSerial,
        timeslot: Timeslot,
    ) -> Result<Option<Identity>, StoreError>;

    /// Identity with the highest timeslot for `serial`.
    async fn latest(&self, serial: &AgentSerial) -> Result<Option<Identity>, StoreError>;

    /// All identities of `serial`, timeslot ascending.
    async fn history(&self, serial: &AgentSerial) -> Result<Vec<Identity>, StoreError>;

    /// All identities issued for `timeslot`, ordered by serial.
    async fn list_by_timeslot(&self, timeslot: Timeslot) -> Result<Vec<Identity>, StoreError>;

    /// Total persisted identities.
    async fn count(&self) -> Result<usize, StoreError>;

    /// Distinct agents with at least one identity.
    async fn unique_agents(&self) -> Result<usize, StoreError>;

    /// Highest persisted timeslot, `Timeslot::GENESIS` when empty.
    async fn max_timeslot(&self) -> Result<Timeslot, StoreError>;
}

/// Cryptographically secure source of fresh badge seeds.
pub trait SeedSource: Send + Sync {
    /// A fresh seed. Never returns the same value twice in practice.
    fn next_seed(&self) -> BadgeSeed;
}
