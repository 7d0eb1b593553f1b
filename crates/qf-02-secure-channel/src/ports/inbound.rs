//! # Inbound Ports (Driving Ports / API)

use shared_crypto::SymmetricKey;
use shared_types::{CommunicationRecord, HistoricalKeyMaterial, Identity, IV_LEN};

use crate::domain::errors::ChannelResult;

/// Secure channel API.
///
/// All operations are pure and synchronous; implementations must be
/// thread-safe (`Send + Sync`).
pub trait SecureChannelApi: Send + Sync {
    /// Encrypt under a fresh random IV.
    fn encrypt(&self, plaintext: &[u8], key: &SymmetricKey) -> ([u8; IV_LEN], Vec<u8>);

    /// Decrypt a ciphertext.
    ///
    /// # Errors
    /// * `ChannelError::Decryption` - invalid padding
    ///
    /// # Security Warning
    ///
    /// A wrong key occasionally yields valid padding; the garbage is then
    /// returned as if it were the plaintext.
    fn decrypt(
        &self,
        ciphertext: &[u8],
        iv: &[u8; IV_LEN],
        key: &SymmetricKey,
    ) -> ChannelResult<Vec<u8>>;

    /// Encrypt `message` under the sender's current badge and build the
    /// record. Nothing is persisted.
    fn send(&self, sender: &Identity, receiver: &Identity, message: &[u8]) -> CommunicationRecord;

    /// Replay a record under arbitrary historical key material.
    fn open(
        &self,
        record: &CommunicationRecord,
        material: &HistoricalKeyMaterial,
    ) -> ChannelResult<Vec<u8>>;
}
