//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of this subsystem.

use async_trait::async_trait;
use shared_types::{AgentSerial, Identity, Timeslot};

use crate::domain::errors::IdentityResult;
use crate::service::{AdvanceReport, FleetStatus};

/// Fleet identity API.
///
/// Implementations must be thread-safe (`Send + Sync`).
#[async_trait]
pub trait FleetIdentityApi: Send + Sync {
    /// Advance the global timeslot and issue a fresh identity to every agent.
    ///
    /// The new timeslot is consumed even if persistence fails; it is only
    /// established once every identity is stored.
    async fn advance(&self) -> IdentityResult<AdvanceReport>;

    /// Most recent identity of an agent.
    ///
    /// # Errors
    /// * `IdentityError::UnknownAgent` - serial is not in the roster
    async fn current_identity(&self, serial: &AgentSerial) -> IdentityResult<Option<Identity>>;

    /// Identity of an agent at the established timeslot.
    ///
    /// This is the identity communications must use. It lags
    /// `current_identity` while an advance is in flight or after one failed
    /// partway through persistence. `None` before the first established
    /// timeslot.
    ///
    /// # Errors
    /// * `IdentityError::UnknownAgent` - serial is not in the roster
    async fn established_identity(&self, serial: &AgentSerial) -> IdentityResult<Option<Identity>>;

    /// Identity of an agent at a specific timeslot.
    async fn identity_at(
        &self,
        serial: &AgentSerial,
        timeslot: Timeslot,
    ) -> IdentityResult<Option<Identity>>;

    /// Every identity issued for a timeslot, ordered by serial.
    async fn identities_for(&self, timeslot: Timeslot) -> IdentityResult<Vec<Identity>>;

    /// Full history of an agent, timeslot ascending.
    async fn history(&self, serial: &AgentSerial) -> IdentityResult<Vec<Identity>>;

    /// Clock and roster snapshot.
    fn status(&self) -> FleetStatus;
}
