//! # Communication Audit Subsystem (QF-03)
//!
//! Append-only log of encrypted agent communications, plus the `Verifier`
//! that replays historical key derivation to authenticate any logged record.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): verification state machine
//! - **Ports Layer** (`ports/`): `CommunicationAuditApi` inbound,
//!   `CommunicationStore` outbound
//! - **Adapters Layer** (`adapters/`): in-memory log
//! - **Service Layer** (`service.rs`): `CommunicationAudit`

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::memory::InMemoryCommunicationStore;
pub use domain::errors::{AuditError, AuditResult};
pub use domain::verifier::{
    FailureReason, VerificationFailure, VerificationOutcome, VerificationStage, Verifier,
    VerifierConfig,
};
pub use ports::inbound::CommunicationAuditApi;
pub use ports::outbound::CommunicationStore;
pub use service::CommunicationAudit;
