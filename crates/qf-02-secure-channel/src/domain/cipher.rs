//! # Message Cipher
//!
//! Thin domain layer over AES-256-CBC from `shared-crypto`, plus the
//! unkeyed content hash stored alongside every record.
//!
//! ## Security Notes
//!
//! - The content hash is SHA-256 over the ciphertext only. It detects
//!   accidental corruption of a stored record but anyone can recompute it,
//!   so it is not a MAC.
//! - Decrypting under the wrong key usually fails on padding, but a small
//!   fraction of attempts unpad cleanly and return garbage. Nothing here
//!   can tell that garbage from the real plaintext.

use shared_crypto::{sha256, Iv, SymmetricKey};
use shared_types::{CommunicationRecord, Digest, IV_LEN};

use super::errors::ChannelResult;

/// Encrypt under a fresh random IV.
pub fn encrypt(plaintext: &[u8], key: &SymmetricKey) -> ([u8; IV_LEN], Vec<u8>) {
    let (iv, ciphertext) = shared_crypto::encrypt(key, plaintext);
    (*iv.as_bytes(), ciphertext)
}

/// Decrypt and strip PKCS#7 padding.
///
/// # Errors
/// * `ChannelError::Decryption` - invalid padding, empty or misaligned input
pub fn decrypt(ciphertext: &[u8], iv: &[u8; IV_LEN], key: &SymmetricKey) -> ChannelResult<Vec<u8>> {
    Ok(shared_crypto::decrypt(key, ciphertext, &Iv::from_bytes(*iv))?)
}

/// SHA-256 of the ciphertext.
pub fn content_hash(ciphertext: &[u8]) -> Digest {
    sha256(ciphertext)
}

/// Whether a record's stored content hash still matches its ciphertext.
pub fn content_hash_matches(record: &CommunicationRecord) -> bool {
    content_hash(&record.ciphertext) == record.content_hash
}
