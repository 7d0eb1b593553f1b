//! # Secure Channel Subsystem (QF-02)
//!
//! Encrypts agent-to-agent messages under a key derived from the sender's
//! current badge: `key = SHA-256(badge)`, AES-256-CBC, PKCS#7, random IV.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): cipher wrapper and content hash
//! - **Ports Layer** (`ports/`): `SecureChannelApi`
//! - **Service Layer** (`service.rs`): `SecureChannel`
//!
//! ## Security Notes
//!
//! - No authentication tag. Decryption under a wrong key fails on padding
//!   most of the time but can occasionally return garbage as plaintext.
//! - `content_hash` is SHA-256 of the ciphertext and is not keyed.

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::cipher::{content_hash, content_hash_matches};
pub use domain::errors::{ChannelError, ChannelResult};
pub use ports::inbound::SecureChannelApi;
pub use service::SecureChannel;
