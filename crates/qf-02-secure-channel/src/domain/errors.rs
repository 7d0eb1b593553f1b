use shared_crypto::CryptoError;
use thiserror::Error;

/// Secure channel errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// Unpadding failed: wrong key, corrupted ciphertext, or input that is
    /// empty or not block-aligned. The only failure signal the cipher has.
    #[error("Decryption failed")]
    Decryption,
}

impl From<CryptoError> for ChannelError {
    fn from(_: CryptoError) -> Self {
        ChannelError::Decryption
    }
}

/// Result type for channel operations
pub type ChannelResult<T> = Result<T, ChannelError>;
