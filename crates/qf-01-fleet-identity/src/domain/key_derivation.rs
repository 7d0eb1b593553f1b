//! # Key Derivation
//!
//! `key = SHA-256(badge)`. No salt and no per-call randomness, so the
//! sender and a later auditor derive the identical key from the same badge.

use shared_crypto::{sha256, SymmetricKey};
use shared_types::{Badge, HistoricalKeyMaterial};

/// Derive the 256-bit channel key for a badge.
pub fn derive(badge: &Badge) -> SymmetricKey {
    SymmetricKey::from_bytes(sha256(badge.as_bytes()))
}

/// Derive the key for replaying a historical exchange.
pub fn derive_historical(material: &HistoricalKeyMaterial) -> SymmetricKey {
    derive(&material.badge)
}
