//! # Quantum-Fleet Benchmarks
//!
//! | Subsystem | Measured |
//! |-----------|----------|
//! | qf-01 Fleet Identity | badge hash, parallel issuance, advance barrier |
//! | qf-02 Secure Channel | encrypt, send, replay by message size |
//! | qf-03 Communication Audit | replay verification, log queries |

use criterion::{criterion_group, criterion_main};
use qf_tests::benchmarks::{qf_01_fleet_identity, qf_02_secure_channel, qf_03_communication_audit};

criterion_group!(
    benches,
    qf_01_fleet_identity::register_benchmarks,
    qf_02_secure_channel::register_benchmarks,
    qf_03_communication_audit::register_benchmarks
);
criterion_main!(benches);
