//! # Fleet Messaging
//!
//! Agent-to-agent messaging on top of the subsystems: resolve established
//! identities (qf-01), encrypt (qf-02), log (qf-03).
//!
//! Identities are always resolved at the established timeslot, never at the
//! newest row in the store. A timeslot whose advance is still running, or
//! failed partway through persistence, is never claimed by a message.
//!
//! ```text
//! send(a, b, msg)
//!   ├─ identity.established_identity(a), (b)   NoCurrentIdentity if absent
//!   ├─ channel.send(a, b, msg)             key = SHA-256(badge_a)
//!   └─ audit.log(record)                   → RecordId
//! ```

use std::sync::Arc;

use qf_01_fleet_identity::{FleetIdentityApi, IdentityStore};
use qf_02_secure_channel::{ChannelError, SecureChannel, SecureChannelApi};
use qf_03_communication_audit::{
    CommunicationAudit, CommunicationAuditApi, CommunicationStore, VerificationOutcome, Verifier,
};
use quantum_telemetry::{
    metric_inc, COMMUNICATIONS_LOGGED, INTERCEPTIONS, MESSAGES_SENT, VERIFICATIONS,
};
use serde::Serialize;
use shared_types::{AgentSerial, CommunicationRecord, Identity, RecordId};
use tracing::{debug, info, warn};

use crate::container::{FleetContainer, FleetIdentity};
use crate::errors::{RuntimeError, RuntimeResult};

/// Counts from one broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BroadcastReport {
    pub successful: usize,
    pub failed: usize,
}

/// Ids of the two legs of a peer-to-peer exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExchangeReport {
    pub status: RecordId,
    pub acknowledgement: RecordId,
    /// Both legs replayed successfully through the Verifier.
    pub verified: bool,
}

/// What an attacker got out of a captured record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterceptionOutcome {
    /// Padding check rejected the attacker's key.
    Blocked,
    /// Padding happened to validate; the attacker got garbage.
    FalseAccept { garbage: Vec<u8> },
    /// The attacker recovered the real plaintext.
    Recovered { plaintext: Vec<u8> },
}

impl InterceptionOutcome {
    /// Whether the attacker learned the message.
    pub fn is_breach(&self) -> bool {
        matches!(self, InterceptionOutcome::Recovered { .. })
    }

    fn label(&self) -> &'static str {
        match self {
            InterceptionOutcome::Blocked => "blocked",
            InterceptionOutcome::FalseAccept { .. } => "false-accept",
            InterceptionOutcome::Recovered { .. } => "recovered",
        }
    }
}

/// Messaging facade over the wired subsystems.
#[derive(Clone)]
pub struct FleetMessenger {
    identity: Arc<FleetIdentity>,
    channel: SecureChannel,
    audit: Arc<CommunicationAudit<dyn CommunicationStore>>,
    verifier: Arc<Verifier<dyn IdentityStore>>,
}

impl FleetMessenger {
    pub fn new(container: &FleetContainer) -> Self {
        Self {
            identity: Arc::clone(&container.identity),
            channel: container.channel,
            audit: Arc::clone(&container.audit),
            verifier: Arc::clone(&container.verifier),
        }
    }

    /// Send one message and log it.
    ///
    /// # Errors
    /// * `RuntimeError::NoCurrentIdentity` - no timeslot is established yet
    /// * `RuntimeError::Identity` - unknown agent or identity store failure
    /// * `RuntimeError::Audit` - the record could not be logged
    pub async fn send(
        &self,
        sender: &AgentSerial,
        receiver: &AgentSerial,
        message: &[u8],
    ) -> RuntimeResult<RecordId> {
        let result = self.try_send(sender, receiver, message).await;
        let outcome = if result.is_ok() { "success" } else { "failed" };
        metric_inc!(MESSAGES_SENT, &[outcome]);
        result
    }

    async fn try_send(
        &self,
        sender: &AgentSerial,
        receiver: &AgentSerial,
        message: &[u8],
    ) -> RuntimeResult<RecordId> {
        let from = self.established_identity(sender).await?;
        let to = self.established_identity(receiver).await?;
        self.send_between(&from, &to, message).await
    }

    async fn send_between(
        &self,
        from: &Identity,
        to: &Identity,
        message: &[u8],
    ) -> RuntimeResult<RecordId> {
        let record = self.channel.send(from, to, message);
        let id = self.audit.log(record).await?;
        metric_inc!(COMMUNICATIONS_LOGGED);
        debug!(%id, sender = %from.serial, receiver = %to.serial, "[fleet] message sent");
        Ok(id)
    }

    /// Send `message` from `sender` to every other agent in the roster.
    ///
    /// Per-recipient failures are counted, not returned.
    ///
    /// # Errors
    /// * `RuntimeError::NoCurrentIdentity` - the sender has no identity yet
    pub async fn broadcast(
        &self,
        sender: &AgentSerial,
        message: &[u8],
    ) -> RuntimeResult<BroadcastReport> {
        let from = self.established_identity(sender).await?;
        let mut report = BroadcastReport::default();

        for receiver in self.identity.roster().iter().filter(|s| *s != sender) {
            let result = match self.established_identity(receiver).await {
                Ok(to) => self.send_between(&from, &to, message).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(_) => {
                    metric_inc!(MESSAGES_SENT, &["success"]);
                    report.successful += 1;
                }
                Err(e) => {
                    metric_inc!(MESSAGES_SENT, &["failed"]);
                    warn!(%sender, %receiver, error = %e, "[fleet] broadcast leg failed");
                    report.failed += 1;
                }
            }
        }

        info!(
            %sender,
            successful = report.successful,
            failed = report.failed,
            "[fleet] broadcast complete"
        );
        Ok(report)
    }

    /// Two-way exchange: a status report from `first`, an acknowledgement
    /// from `second`. Both legs are logged and then replayed.
    pub async fn peer_to_peer_exchange(
        &self,
        first: &AgentSerial,
        second: &AgentSerial,
    ) -> RuntimeResult<ExchangeReport> {
        let status_msg = format!("Hello from {first}. Status: Operational");
        let ack_msg = format!("Acknowledged by {second}. Standing by");

        let status = self.send(first, second, status_msg.as_bytes()).await?;
        let acknowledgement = self.send(second, first, ack_msg.as_bytes()).await?;

        let verified = self.verify_logged(status).await?.is_verified()
            && self.verify_logged(acknowledgement).await?.is_verified();

        info!(%first, %second, verified, "[fleet] peer-to-peer exchange");
        Ok(ExchangeReport {
            status,
            acknowledgement,
            verified,
        })
    }

    /// Try to open a captured record with `attacker`'s established badge.
    pub async fn intercept(
        &self,
        record: &CommunicationRecord,
        attacker: &AgentSerial,
    ) -> RuntimeResult<InterceptionOutcome> {
        let attacker_identity = self.established_identity(attacker).await?;

        let outcome = match self.channel.open(record, &attacker_identity.key_material()) {
            Err(ChannelError::Decryption) => InterceptionOutcome::Blocked,
            Ok(opened) => {
                let genuine = match self.verifier.verify(record).await? {
                    VerificationOutcome::Verified { plaintext } => Some(plaintext),
                    VerificationOutcome::Failed(_) => None,
                };
                if genuine.as_deref() == Some(opened.as_slice()) {
                    InterceptionOutcome::Recovered { plaintext: opened }
                } else {
                    InterceptionOutcome::FalseAccept { garbage: opened }
                }
            }
        };

        metric_inc!(INTERCEPTIONS, &[outcome.label()]);
        if outcome.is_breach() {
            warn!(%attacker, sender = %record.sender, "[fleet] interception recovered plaintext");
        } else {
            info!(%attacker, outcome = outcome.label(), "[fleet] interception failed");
        }
        Ok(outcome)
    }

    /// Replay a logged record through the Verifier.
    pub async fn verify_logged(&self, id: RecordId) -> RuntimeResult<VerificationOutcome> {
        let logged = self.audit.get(id).await?;
        let outcome = self.verifier.verify(&logged.record).await?;
        metric_inc!(VERIFICATIONS, &[outcome.label()]);
        debug!(%id, outcome = outcome.label(), "[fleet] verification");
        Ok(outcome)
    }

    async fn established_identity(&self, serial: &AgentSerial) -> RuntimeResult<Identity> {
        self.identity
            .established_identity(serial)
            .await?
            .ok_or_else(|| RuntimeError::NoCurrentIdentity {
                serial: serial.clone(),
            })
    }
}
