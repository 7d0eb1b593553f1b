//! # Secure Channel Service
//!
//! Implements `SecureChannelApi`. Keys are derived on demand from badges
//! and dropped (zeroized) when the call returns.

use chrono::Utc;
use qf_01_fleet_identity::{derive, derive_historical};
use shared_crypto::SymmetricKey;
use shared_types::{CommunicationRecord, HistoricalKeyMaterial, Identity, IV_LEN};
use tracing::debug;

use crate::domain::cipher;
use crate::domain::errors::ChannelResult;
use crate::ports::inbound::SecureChannelApi;

/// Stateless badge-keyed channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecureChannel;

impl SecureChannel {
    pub fn new() -> Self {
        Self
    }
}

impl SecureChannelApi for SecureChannel {
    fn encrypt(&self, plaintext: &[u8], key: &SymmetricKey) -> ([u8; IV_LEN], Vec<u8>) {
        cipher::encrypt(plaintext, key)
    }

    fn decrypt(
        &self,
        ciphertext: &[u8],
        iv: &[u8; IV_LEN],
        key: &SymmetricKey,
    ) -> ChannelResult<Vec<u8>> {
        cipher::decrypt(ciphertext, iv, key)
    }

    fn send(&self, sender: &Identity, receiver: &Identity, message: &[u8]) -> CommunicationRecord {
        let key = derive(&sender.badge);
        let (iv, ciphertext) = cipher::encrypt(message, &key);
        let content_hash = cipher::content_hash(&ciphertext);

        debug!(
            sender = %sender.serial,
            receiver = %receiver.serial,
            sender_timeslot = %sender.timeslot,
            badge = %sender.badge.short_hex(),
            bytes = ciphertext.len(),
            "[qf-02] message encrypted"
        );

        CommunicationRecord {
            sender: sender.serial.clone(),
            receiver: receiver.serial.clone(),
            sender_timeslot: sender.timeslot,
            receiver_timeslot: receiver.timeslot,
            iv,
            ciphertext,
            content_hash,
            sent_at: Utc::now(),
        }
    }

    fn open(
        &self,
        record: &CommunicationRecord,
        material: &HistoricalKeyMaterial,
    ) -> ChannelResult<Vec<u8>> {
        let key = derive_historical(material);
        cipher::decrypt(&record.ciphertext, &record.iv, &key)
    }
}
