//! Badge seed sources.

use rand::rngs::OsRng;
use rand::RngCore;
use shared_types::{BadgeSeed, BADGE_SEED_LEN};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::ports::outbound::SeedSource;

/// Seeds drawn from the operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSeedSource;

impl SeedSource for OsSeedSource {
    fn next_seed(&self) -> BadgeSeed {
        let mut bytes = [0u8; BADGE_SEED_LEN];
        OsRng.fill_bytes(&mut bytes);
        BadgeSeed::from_bytes(bytes)
    }
}

/// Deterministic, never-repeating seeds for tests and benchmarks.
///
/// Each seed is a big-endian counter in the first eight bytes, so the
/// preimage field (`seed[0..16]`) differs on every call. Not secret.
#[derive(Debug, Default)]
pub struct SequenceSeedSource {
    next: AtomicU64,
}

impl SequenceSeedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of seeds handed out so far.
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }
}

impl SeedSource for SequenceSeedSource {
    fn next_seed(&self) -> BadgeSeed {
        let n = self.next.fetch_add(1, Ordering::SeqCst);
        let mut bytes = [0u8; BADGE_SEED_LEN];
        bytes[..8].copy_from_slice(&n.to_be_bytes());
        BadgeSeed::from_bytes(bytes)
    }
}
