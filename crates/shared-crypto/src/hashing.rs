//! # One-Way Hashing
//!
//! The badge generator consumes a one-way function `H: bytes -> 32 bytes`
//! as a black box. This module defines that seam and ships two
//! implementations, plus the SHA-256 helper used for key derivation and
//! content hashes.
//!
//! | Primitive | Use Case |
//! |-----------|----------|
//! | SHA3-256 | Default badge hash |
//! | BLAKE3 | Alternative badge hash |
//! | SHA-256 | Badge -> key derivation, ciphertext content hash |

use sha2::{Digest as _, Sha256};
use sha3::Sha3_256;
use std::fmt;
use std::str::FromStr;

use crate::CryptoError;

/// 256-bit hash output.
pub type Hash = [u8; 32];

/// A deterministic, pre-image resistant function producing 32 bytes.
///
/// Implementations must be pure: the same input always yields the same
/// output, across processes and machines.
pub trait OneWayHash: Send + Sync {
    /// Hash `input` to 32 bytes.
    fn digest(&self, input: &[u8]) -> Hash;

    /// Short algorithm name for logs.
    fn name(&self) -> &'static str;
}

/// SHA3-256 badge hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha3OneWay;

impl OneWayHash for Sha3OneWay {
    fn digest(&self, input: &[u8]) -> Hash {
        Sha3_256::digest(input).into()
    }

    fn name(&self) -> &'static str {
        "sha3-256"
    }
}

/// BLAKE3 badge hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3OneWay;

impl OneWayHash for Blake3OneWay {
    fn digest(&self, input: &[u8]) -> Hash {
        blake3_hash(input)
    }

    fn name(&self) -> &'static str {
        "blake3"
    }
}

/// Selectable badge hash algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashAlgorithm {
    /// SHA3-256 (default)
    #[default]
    Sha3,
    /// BLAKE3
    Blake3,
}

impl HashAlgorithm {
    /// Boxed implementation for this algorithm.
    pub fn one_way(self) -> Box<dyn OneWayHash> {
        match self {
            HashAlgorithm::Sha3 => Box::new(Sha3OneWay),
            HashAlgorithm::Blake3 => Box::new(Blake3OneWay),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha3" | "sha3-256" => Ok(HashAlgorithm::Sha3),
            "blake3" => Ok(HashAlgorithm::Blake3),
            other => Err(CryptoError::UnknownAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlgorithm::Sha3 => f.write_str("sha3"),
            HashAlgorithm::Blake3 => f.write_str("blake3"),
        }
    }
}

/// Hash data with SHA-256 (one-shot).
pub fn sha256(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

/// Hash data with BLAKE3 (one-shot).
pub fn blake3_hash(data: &[u8]) -> Hash {
    *blake3::hash(data).as_bytes()
}
