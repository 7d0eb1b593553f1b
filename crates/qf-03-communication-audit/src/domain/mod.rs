//! # Domain Layer
//!
//! Verification state machine and audit errors.

pub mod errors;
pub mod verifier;
