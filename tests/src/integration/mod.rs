//! # Integration Flows
//!
//! Identity rotation, secure channel and audit replay exercised together
//! through the public subsystem APIs and the fleet runtime.

pub mod audit_flows;
pub mod rotation_flows;
