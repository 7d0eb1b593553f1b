//! # Domain Layer
//!
//! Pure, synchronous, CPU-bound cipher logic.

pub mod cipher;
pub mod errors;
