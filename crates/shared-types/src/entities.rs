//! # Core Domain Entities
//!
//! Defines the fleet identity entities shared by every subsystem.
//!
//! ## Clusters
//!
//! - **Identity**: `AgentSerial`, `Timeslot`, `BadgeSeed`, `Badge`, `Identity`
//! - **Replay**: `HistoricalKeyMaterial`
//! - **Communication**: `CommunicationRecord`, `LoggedCommunication`, `CommunicationFilter`
//! - **Statistics**: `StoreStats`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::SerialError;

/// Length of a badge seed in bytes.
pub const BADGE_SEED_LEN: usize = 32;

/// Length of a badge in bytes.
pub const BADGE_LEN: usize = 32;

/// Length of a CBC initialisation vector in bytes.
pub const IV_LEN: usize = 16;

/// A 32-byte digest (SHA-256, SHA3-256 or BLAKE3 output).
pub type Digest = [u8; 32];

/// Default row limit for communication queries.
pub const DEFAULT_QUERY_LIMIT: usize = 100;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// Unique, immutable, non-empty agent identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AgentSerial(String);

impl AgentSerial {
    /// Create a serial, rejecting the empty string.
    pub fn new(serial: impl Into<String>) -> Result<Self, SerialError> {
        let serial = serial.into();
        if serial.is_empty() {
            return Err(SerialError::Empty);
        }
        Ok(Self(serial))
    }

    /// Borrow the serial as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Raw UTF-8 bytes of the serial.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl TryFrom<String> for AgentSerial {
    type Error = SerialError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AgentSerial> for String {
    fn from(serial: AgentSerial) -> Self {
        serial.0
    }
}

impl fmt::Display for AgentSerial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Global, fleet-wide interval index.
///
/// Timeslot 0 is the genesis value held before the first advance; the first
/// identities are generated for timeslot 1.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timeslot(u64);

impl Timeslot {
    /// The value held by a fresh clock.
    pub const GENESIS: Timeslot = Timeslot(0);

    /// Wrap a raw timeslot number.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw timeslot number.
    pub const fn value(self) -> u64 {
        self.0
    }

    /// The following timeslot, or `None` on overflow.
    pub fn checked_next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// Big-endian encoding used in the badge preimage.
    pub fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl fmt::Display for Timeslot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Single-use random seed mixed into a badge preimage.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeSeed([u8; BADGE_SEED_LEN]);

impl BadgeSeed {
    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; BADGE_SEED_LEN]) -> Self {
        Self(bytes)
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8; BADGE_SEED_LEN] {
        &self.0
    }
}

// Seeds are secret material; never print them.
impl fmt::Debug for BadgeSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BadgeSeed(..)")
    }
}

/// Rotating credential of one agent for one timeslot.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Badge([u8; BADGE_LEN]);

impl Badge {
    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; BADGE_LEN]) -> Self {
        Self(bytes)
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8; BADGE_LEN] {
        &self.0
    }

    /// Full lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// First eight bytes as hex, for log lines.
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl fmt::Debug for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Badge({}..)", self.short_hex())
    }
}

/// The persisted binding of an agent, a timeslot, the seed used and the
/// resulting badge. Append-only: never mutated once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Owning agent.
    pub serial: AgentSerial,
    /// Timeslot this identity is valid for.
    pub timeslot: Timeslot,
    /// Wall-clock generation time.
    pub timestamp: DateTime<Utc>,
    /// Seed that went into the badge preimage.
    pub seed: BadgeSeed,
    /// Resulting badge.
    pub badge: Badge,
}

impl Identity {
    /// Strip the identity down to the fields key derivation needs.
    pub fn key_material(&self) -> HistoricalKeyMaterial {
        HistoricalKeyMaterial {
            serial: self.serial.clone(),
            timeslot: self.timeslot,
            badge: self.badge,
        }
    }
}

// =============================================================================
// CLUSTER B: REPLAY
// =============================================================================

/// Minimal key material recovered for a historical (serial, timeslot).
///
/// Not an `Identity`: carries no seed and no timestamp and cannot be
/// appended to a ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoricalKeyMaterial {
    /// Agent the badge belonged to.
    pub serial: AgentSerial,
    /// Timeslot the badge was valid for.
    pub timeslot: Timeslot,
    /// The badge itself.
    pub badge: Badge,
}

// =============================================================================
// CLUSTER C: COMMUNICATION
// =============================================================================

/// Monotonically increasing identifier assigned by the communication log.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One encrypted message between two identified agents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunicationRecord {
    /// Sending agent.
    pub sender: AgentSerial,
    /// Receiving agent.
    pub receiver: AgentSerial,
    /// Sender's timeslot at send time; selects the key for replay.
    pub sender_timeslot: Timeslot,
    /// Receiver's timeslot at send time.
    pub receiver_timeslot: Timeslot,
    /// CBC initialisation vector.
    pub iv: [u8; IV_LEN],
    /// AES-256-CBC ciphertext (PKCS#7 padded).
    pub ciphertext: Vec<u8>,
    /// SHA-256 of `ciphertext`. Tamper evidence only; not keyed.
    pub content_hash: Digest,
    /// When the sender produced the record.
    pub sent_at: DateTime<Utc>,
}

/// A record as stored in the communication log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedCommunication {
    /// Identifier assigned at log time.
    pub id: RecordId,
    /// Persisted log timestamp.
    pub logged_at: DateTime<Utc>,
    /// The immutable record.
    pub record: CommunicationRecord,
}

/// Filter for communication log queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunicationFilter {
    /// Only records sent by this agent.
    pub sender: Option<AgentSerial>,
    /// Only records addressed to this agent.
    pub receiver: Option<AgentSerial>,
    /// Maximum number of rows returned.
    pub limit: usize,
}

impl Default for CommunicationFilter {
    fn default() -> Self {
        Self {
            sender: None,
            receiver: None,
            limit: DEFAULT_QUERY_LIMIT,
        }
    }
}

impl CommunicationFilter {
    /// Restrict to a sender.
    pub fn sender(mut self, sender: AgentSerial) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Restrict to a receiver.
    pub fn receiver(mut self, receiver: AgentSerial) -> Self {
        self.receiver = Some(receiver);
        self
    }

    /// Set the row limit.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Whether a record passes the sender/receiver predicates.
    pub fn matches(&self, record: &CommunicationRecord) -> bool {
        self.sender.as_ref().map_or(true, |s| *s == record.sender)
            && self.receiver.as_ref().map_or(true, |r| *r == record.receiver)
    }
}

// =============================================================================
// CLUSTER D: STATISTICS
// =============================================================================

/// Aggregate counts over the identity and communication stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoreStats {
    /// Identities persisted across all timeslots.
    pub total_identities: usize,
    /// Distinct agents with at least one identity.
    pub unique_agents: usize,
    /// Logged communications.
    pub total_communications: usize,
    /// Highest timeslot with a persisted identity.
    pub max_timeslot: Timeslot,
}
