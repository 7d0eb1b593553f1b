//! # Fleet Identity Subsystem (QF-01)
//!
//! Owns the global timeslot clock and issues every agent a fresh,
//! unlinkable badge per timeslot.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): clock, badge generation, key derivation, ledger
//! - **Ports Layer** (`ports/`): `FleetIdentityApi` inbound, `IdentityStore` and
//!   `SeedSource` outbound
//! - **Adapters Layer** (`adapters/`): in-memory store, OS and sequence seed sources
//! - **Service Layer** (`service.rs`): wires the clock, generator and store
//!
//! ## Security Notes
//!
//! - Badges are deterministic given (serial, timeslot, seed) and unpredictable
//!   without the seed. Seed reuse is not detected.
//! - `SymmetricKey` is never persisted; it is re-derived from the badge.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::memory::InMemoryIdentityStore;
pub use adapters::seed::{OsSeedSource, SequenceSeedSource};
pub use domain::badge::{badge_preimage, BadgeGenerator, PREIMAGE_LEN};
pub use domain::clock::{FleetClock, FleetState};
pub use domain::errors::{IdentityError, IdentityResult};
pub use domain::key_derivation::{derive, derive_historical};
pub use domain::ledger::IdentityLedger;
pub use ports::inbound::FleetIdentityApi;
pub use ports::outbound::{IdentityStore, SeedSource};
pub use service::{fleet_roster, AdvanceReport, FleetIdentityService, FleetStatus};
