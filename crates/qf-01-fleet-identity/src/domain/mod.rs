//! # Domain Layer
//!
//! Clock, badge and key logic with no I/O of its own. The ledger reaches
//! persistence only through the `IdentityStore` port.

pub mod badge;
pub mod clock;
pub mod errors;
pub mod key_derivation;
pub mod ledger;
