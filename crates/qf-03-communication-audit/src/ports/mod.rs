//! # Ports Layer
//!
//! - **Inbound (Driving)**: `CommunicationAuditApi`
//! - **Outbound (Driven)**: `CommunicationStore`

pub mod inbound;
pub mod outbound;
