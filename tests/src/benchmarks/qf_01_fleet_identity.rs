//! # QF-01 Fleet Identity Benchmarks
//!
//! - Single badge generation per hash algorithm
//! - Parallel fleet issuance as the roster grows
//! - Full `advance` including the store barrier

use std::sync::Arc;

use chrono::Utc;
use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use qf_01_fleet_identity::{
    fleet_roster, BadgeGenerator, FleetIdentityApi, FleetIdentityService, InMemoryIdentityStore,
    SequenceSeedSource,
};
use shared_crypto::HashAlgorithm;
use shared_types::{AgentSerial, BadgeSeed, Timeslot};

pub fn bench_badge_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("qf-01-badge-generation");
    let serial = AgentSerial::new("AGENT-BENCH-001").unwrap();
    let seed = BadgeSeed::from_bytes([0x5A; 32]);

    for algorithm in [HashAlgorithm::Sha3, HashAlgorithm::Blake3] {
        let generator = BadgeGenerator::with_algorithm(algorithm);
        group.bench_function(algorithm.to_string(), |b| {
            b.iter(|| black_box(generator.generate(&serial, Timeslot::new(42), &seed)))
        });
    }

    group.finish();
}

pub fn bench_fleet_issuance(c: &mut Criterion) {
    let mut group = c.benchmark_group("qf-01-fleet-issuance");
    let generator = BadgeGenerator::default();
    let seeds = SequenceSeedSource::new();

    for size in [10usize, 40, 200, 1000] {
        let roster = fleet_roster("BENCH", size).unwrap();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("issue_fleet", size), &roster, |b, roster| {
            b.iter(|| black_box(generator.issue_fleet(roster, Timeslot::new(1), &seeds, Utc::now())))
        });
    }

    group.finish();
}

pub fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("qf-01-advance");
    let rt = tokio::runtime::Runtime::new().unwrap();

    for size in [40usize, 400] {
        let service = FleetIdentityService::new(
            "BENCH",
            fleet_roster("BENCH", size).unwrap(),
            BadgeGenerator::default(),
            Arc::new(SequenceSeedSource::new()),
            Arc::new(InMemoryIdentityStore::new()),
        )
        .unwrap();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(BenchmarkId::new("advance", size), |b| {
            b.iter(|| black_box(rt.block_on(service.advance()).unwrap()))
        });
    }

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_badge_generation(c);
    bench_fleet_issuance(c);
    bench_advance(c);
}
