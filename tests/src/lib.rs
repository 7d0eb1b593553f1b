//! # Quantum-Fleet Test Suite
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Criterion groups per subsystem
//! │   ├── qf_01_fleet_identity.rs
//! │   ├── qf_02_secure_channel.rs
//! │   └── qf_03_communication_audit.rs
//! │
//! └── integration/      # Cross-subsystem flows
//!     ├── rotation_flows.rs
//!     └── audit_flows.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p qf-tests
//! cargo test -p qf-tests integration::
//! cargo bench -p qf-tests
//! ```

pub mod benchmarks;
pub mod integration;
