//! # Quantum-Fleet Benchmarks
//!
//! Criterion groups per subsystem, registered from `benches/fleet_benchmarks.rs`.

pub mod qf_01_fleet_identity;
pub mod qf_02_secure_channel;
pub mod qf_03_communication_audit;
