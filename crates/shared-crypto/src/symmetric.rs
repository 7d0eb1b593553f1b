//! # Symmetric Encryption
//!
//! AES-256-CBC with PKCS#7 padding and a fresh random IV per message.
//!
//! ## Security Properties
//!
//! - **IV**: 128 bits from the thread-local CSPRNG, never derived from the
//!   plaintext.
//! - **No integrity tag**: the only failure signal on decrypt is invalid
//!   padding. A wrong key yields valid padding with probability of roughly
//!   1/256 per message, and the resulting garbage is returned as if it were
//!   the plaintext. Callers that need authenticity must add a keyed tag on
//!   top of this layer.

use aes::Aes256;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::CryptoError;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Symmetric key (256-bit).
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; 32]);

impl SymmetricKey {
    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Generate random key.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut bytes);
        Self(bytes)
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SymmetricKey(..)")
    }
}

/// CBC initialisation vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Iv([u8; BLOCK_SIZE]);

impl Iv {
    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; BLOCK_SIZE]) -> Self {
        Self(bytes)
    }

    /// Generate random IV.
    pub fn generate() -> Self {
        let mut bytes = [0u8; BLOCK_SIZE];
        rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut bytes);
        Self(bytes)
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8; BLOCK_SIZE] {
        &self.0
    }
}

/// Encrypt plaintext with AES-256-CBC under a fresh IV.
///
/// Returns (iv, ciphertext). The ciphertext is always a non-zero multiple
/// of [`BLOCK_SIZE`]; an empty plaintext encrypts to one full padding block.
pub fn encrypt(key: &SymmetricKey, plaintext: &[u8]) -> (Iv, Vec<u8>) {
    let iv = Iv::generate();
    let ciphertext = encrypt_with_iv(key, &iv, plaintext);
    (iv, ciphertext)
}

/// Encrypt under a caller-chosen IV. Used for fixed test vectors.
pub fn encrypt_with_iv(key: &SymmetricKey, iv: &Iv, plaintext: &[u8]) -> Vec<u8> {
    Aes256CbcEnc::new(key.as_bytes().into(), iv.as_bytes().into())
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext)
}

/// Decrypt AES-256-CBC ciphertext and strip PKCS#7 padding.
///
/// # Errors
///
/// Returns `CryptoError::InvalidPadding` when the ciphertext is empty, not
/// block aligned, or unpads to an invalid pad. This is the only signal for
/// a wrong key or corrupted ciphertext.
pub fn decrypt(key: &SymmetricKey, ciphertext: &[u8], iv: &Iv) -> Result<Vec<u8>, CryptoError> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(CryptoError::InvalidPadding);
    }

    Aes256CbcDec::new(key.as_bytes().into(), iv.as_bytes().into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CryptoError::InvalidPadding)
}
