//! # Replay Verifier
//!
//! Authenticates a logged communication by recomputing the key that was
//! valid when it was sent.
//!
//! ## State Machine
//!
//! ```text
//! start ──→ badge-lookup ──→ key-derive ──→ decrypt ──→ content-hash ──→ verified
//!               │                              │              │
//!               └─ badge-not-found             └─ decrypt-failed
//!                                                             └─ hash-mismatch
//! ```
//!
//! A single pass, read-only and idempotent. Only store failures surface as
//! `Err`; every protocol failure is a `VerificationOutcome::Failed` value.
//!
//! ## Known Limitation
//!
//! Decryption has no integrity tag, so a record opened under the wrong key
//! can occasionally unpad cleanly. The content hash does not catch this:
//! it covers the ciphertext, which is intact.

use qf_01_fleet_identity::IdentityStore;
use qf_02_secure_channel::{content_hash_matches, ChannelError, SecureChannel, SecureChannelApi};
use serde::Serialize;
use shared_types::{CommunicationRecord, StoreError};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Verifier options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifierConfig {
    /// Compare the stored content hash after a successful decrypt.
    pub check_content_hash: bool,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            check_content_hash: true,
        }
    }
}

/// Stage of the verification pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerificationStage {
    BadgeLookup,
    KeyDerive,
    Decrypt,
    ContentHash,
}

impl VerificationStage {
    pub fn as_str(self) -> &'static str {
        match self {
            VerificationStage::BadgeLookup => "badge-lookup",
            VerificationStage::KeyDerive => "key-derive",
            VerificationStage::Decrypt => "decrypt",
            VerificationStage::ContentHash => "content-hash",
        }
    }
}

impl fmt::Display for VerificationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a record failed verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureReason {
    /// No identity stored for (sender, sender_timeslot).
    BadgeNotFound,
    /// Replayed key produced invalid padding.
    DecryptFailed,
    /// Stored content hash does not match the ciphertext.
    HashMismatch,
}

impl FailureReason {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureReason::BadgeNotFound => "badge-not-found",
            FailureReason::DecryptFailed => "decrypt-failed",
            FailureReason::HashMismatch => "hash-mismatch",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed verification. A value, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VerificationFailure {
    pub reason: FailureReason,
    pub stage: VerificationStage,
}

/// Result of one verification pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// The record was produced under the badge the sender held at
    /// `sender_timeslot`.
    Verified { plaintext: Vec<u8> },
    Failed(VerificationFailure),
}

impl VerificationOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, VerificationOutcome::Verified { .. })
    }

    /// Metric/log label: `verified` or the failure reason.
    pub fn label(&self) -> &'static str {
        match self {
            VerificationOutcome::Verified { .. } => "verified",
            VerificationOutcome::Failed(failure) => failure.reason.as_str(),
        }
    }

    fn failed(reason: FailureReason, stage: VerificationStage) -> Self {
        VerificationOutcome::Failed(VerificationFailure { reason, stage })
    }
}

/// Stateless replay verifier over the identity store.
pub struct Verifier<S: IdentityStore + ?Sized> {
    identities: Arc<S>,
    channel: SecureChannel,
    config: VerifierConfig,
}

impl<S: IdentityStore + ?Sized> Verifier<S> {
    pub fn new(identities: Arc<S>) -> Self {
        Self::with_config(identities, VerifierConfig::default())
    }

    pub fn with_config(identities: Arc<S>, config: VerifierConfig) -> Self {
        Self {
            identities,
            channel: SecureChannel::new(),
            config,
        }
    }

    pub fn config(&self) -> VerifierConfig {
        self.config
    }

    /// Replay a record.
    ///
    /// # Errors
    /// * `StoreError` - identity store unreachable during badge lookup
    pub async fn verify(
        &self,
        record: &CommunicationRecord,
    ) -> Result<VerificationOutcome, StoreError> {
        // badge-lookup
        let Some(identity) = self
            .identities
            .get(&record.sender, record.sender_timeslot)
            .await?
        else {
            debug!(
                sender = %record.sender,
                timeslot = %record.sender_timeslot,
                "[qf-03] no badge for sender timeslot"
            );
            return Ok(VerificationOutcome::failed(
                FailureReason::BadgeNotFound,
                VerificationStage::BadgeLookup,
            ));
        };

        // key-derive + decrypt
        let plaintext = match self.channel.open(record, &identity.key_material()) {
            Ok(plaintext) => plaintext,
            Err(ChannelError::Decryption) => {
                return Ok(VerificationOutcome::failed(
                    FailureReason::DecryptFailed,
                    VerificationStage::Decrypt,
                ));
            }
        };

        // content-hash
        if self.config.check_content_hash && !content_hash_matches(record) {
            return Ok(VerificationOutcome::failed(
                FailureReason::HashMismatch,
                VerificationStage::ContentHash,
            ));
        }

        Ok(VerificationOutcome::Verified { plaintext })
    }
}
