//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that the runtime and dashboards use
//! - **Outbound (Driven)**: Persistence and randomness this subsystem needs

pub mod inbound;
pub mod outbound;
