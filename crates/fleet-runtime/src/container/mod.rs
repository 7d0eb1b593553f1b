//! # Subsystem Container
//!
//! Configuration plus the wired subsystem instances.

pub mod config;
pub mod subsystems;

pub use config::{ConfigError, FleetConfig, DEFAULT_SYSTEM_ID};
pub use subsystems::{FleetContainer, FleetIdentity};
