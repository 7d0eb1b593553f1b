//! # Badge Generation
//!
//! Deterministic derivation of an unpredictable per-(agent, timeslot)
//! credential.
//!
//! ## Canonical Preimage (32 bytes)
//!
//! ```text
//! ┌────────────────────┬──────────────────────┬─────────────────────┐
//! │ serial (8 bytes)   │ timeslot (8 bytes)   │ seed[0..16]         │
//! │ UTF-8, zero-padded │ big-endian u64       │ first half of seed  │
//! │ or truncated       │                      │                     │
//! └────────────────────┴──────────────────────┴─────────────────────┘
//! ```
//!
//! `Badge = H(preimage)`. The layout must be reproduced byte-for-byte so a
//! badge can be recomputed from a persisted identity.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use shared_crypto::{HashAlgorithm, OneWayHash};
use shared_types::{AgentSerial, Badge, BadgeSeed, Identity, Timeslot};
use std::sync::Arc;

use crate::ports::outbound::SeedSource;

/// Serial field width in the preimage.
pub const SERIAL_FIELD_LEN: usize = 8;

/// Timeslot field width in the preimage.
pub const TIMESLOT_FIELD_LEN: usize = 8;

/// Number of seed bytes mixed into the preimage.
pub const SEED_FIELD_LEN: usize = 16;

/// Total preimage length.
pub const PREIMAGE_LEN: usize = SERIAL_FIELD_LEN + TIMESLOT_FIELD_LEN + SEED_FIELD_LEN;

/// Build the canonical badge preimage.
pub fn badge_preimage(
    serial: &AgentSerial,
    timeslot: Timeslot,
    seed: &BadgeSeed,
) -> [u8; PREIMAGE_LEN] {
    let mut preimage = [0u8; PREIMAGE_LEN];

    let serial_bytes = serial.as_bytes();
    let n = serial_bytes.len().min(SERIAL_FIELD_LEN);
    preimage[..n].copy_from_slice(&serial_bytes[..n]);

    let ts_start = SERIAL_FIELD_LEN;
    let seed_start = ts_start + TIMESLOT_FIELD_LEN;
    preimage[ts_start..seed_start].copy_from_slice(&timeslot.to_be_bytes());
    preimage[seed_start..].copy_from_slice(&seed.as_bytes()[..SEED_FIELD_LEN]);

    preimage
}

/// Badge generator over a pluggable one-way hash.
#[derive(Clone)]
pub struct BadgeGenerator {
    hash: Arc<dyn OneWayHash>,
}

impl BadgeGenerator {
    /// Generator over an arbitrary one-way hash.
    pub fn new(hash: Arc<dyn OneWayHash>) -> Self {
        Self { hash }
    }

    /// Generator over one of the built-in algorithms.
    pub fn with_algorithm(algorithm: HashAlgorithm) -> Self {
        Self::new(Arc::from(algorithm.one_way()))
    }

    /// Name of the underlying hash.
    pub fn hash_name(&self) -> &'static str {
        self.hash.name()
    }

    /// Compute the badge for (serial, timeslot, seed).
    pub fn generate(&self, serial: &AgentSerial, timeslot: Timeslot, seed: &BadgeSeed) -> Badge {
        Badge::from_bytes(self.hash.digest(&badge_preimage(serial, timeslot, seed)))
    }

    /// Build a complete identity, consuming the seed.
    pub fn issue(
        &self,
        serial: &AgentSerial,
        timeslot: Timeslot,
        seed: BadgeSeed,
        timestamp: DateTime<Utc>,
    ) -> Identity {
        let badge = self.generate(serial, timeslot, &seed);
        Identity {
            serial: serial.clone(),
            timeslot,
            timestamp,
            seed,
            badge,
        }
    }

    /// Issue identities for every agent in parallel.
    ///
    /// Returns only after all generations finished, in roster order.
    pub fn issue_fleet(
        &self,
        roster: &[AgentSerial],
        timeslot: Timeslot,
        seeds: &dyn SeedSource,
        timestamp: DateTime<Utc>,
    ) -> Vec<Identity> {
        roster
            .par_iter()
            .map(|serial| self.issue(serial, timeslot, seeds.next_seed(), timestamp))
            .collect()
    }
}

impl Default for BadgeGenerator {
    fn default() -> Self {
        Self::with_algorithm(HashAlgorithm::default())
    }
}

impl std::fmt::Debug for BadgeGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BadgeGenerator")
            .field("hash", &self.hash.name())
            .finish()
    }
}
