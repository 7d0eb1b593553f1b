//! # Fleet Runtime Library
//!
//! Exposes the runtime internals for integration tests. The binary entry
//! point is `main.rs`.
//!
//! - `container/` - configuration and subsystem wiring
//! - `messaging` - send, broadcast, exchange and interception over the wired subsystems
//! - `runtime` - timed badge rotation with graceful shutdown

#![allow(clippy::module_name_repetitions)]

pub mod container;
pub mod errors;
pub mod messaging;
pub mod runtime;

pub use container::{ConfigError, FleetConfig, FleetContainer, FleetIdentity, DEFAULT_SYSTEM_ID};
pub use errors::{RuntimeError, RuntimeResult};
pub use messaging::{BroadcastReport, ExchangeReport, FleetMessenger, InterceptionOutcome};
pub use runtime::{FleetRuntime, FleetStats, PatrolReport};
