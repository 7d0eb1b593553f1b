//! # Ports Layer
//!
//! The channel has no outbound dependencies; it never persists anything.

pub mod inbound;
