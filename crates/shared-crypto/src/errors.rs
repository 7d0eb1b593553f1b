//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Unpadding found an invalid PKCS#7 pad (wrong key or corrupted
    /// ciphertext).
    #[error("Decryption failed: invalid padding")]
    InvalidPadding,

    /// Unknown hash algorithm name
    #[error("Unknown hash algorithm: {0}")]
    UnknownAlgorithm(String),
}
