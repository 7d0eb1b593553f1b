//! # Shared Types Crate
//!
//! Domain entities and error types shared by the fleet identity, secure
//! channel and communication audit subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Append-Only Records**: `Identity` and `CommunicationRecord` have no
//!   mutating methods; they are superseded, never edited.
//! - **Secret Hygiene**: Seeds never appear in `Debug` output; badges print
//!   as short prefixes.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
