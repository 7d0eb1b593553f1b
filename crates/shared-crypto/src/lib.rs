//! # Shared Crypto - Fleet Cryptographic Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA3-256, BLAKE3, SHA-256 | Badge hash, key derivation, content hash |
//! | `symmetric` | AES-256-CBC + PKCS#7 | Message encryption |
//!
//! ## Security Properties
//!
//! - **Badge hash**: pluggable through [`OneWayHash`]; SHA3-256 by default
//! - **AES-256-CBC**: random 128-bit IV per message, no authentication tag
//! - **Keys**: zeroized on drop, never printed

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod symmetric;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{blake3_hash, sha256, Blake3OneWay, HashAlgorithm, OneWayHash, Sha3OneWay};
pub use symmetric::{decrypt, encrypt, encrypt_with_iv, Iv, SymmetricKey, BLOCK_SIZE};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
