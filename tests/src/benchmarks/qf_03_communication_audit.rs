//! # QF-03 Communication Audit Benchmarks
//!
//! Replay verification against a populated identity store, and audit log
//! queries over a large log.

use std::sync::Arc;

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use fleet_runtime::{FleetConfig, FleetContainer, FleetRuntime};
use qf_01_fleet_identity::{InMemoryIdentityStore, SequenceSeedSource};
use qf_03_communication_audit::{CommunicationAuditApi, InMemoryCommunicationStore};
use shared_types::CommunicationFilter;

fn populated_runtime(rt: &tokio::runtime::Runtime, timeslots: u64) -> FleetRuntime {
    let container = FleetContainer::with_backends(
        FleetConfig {
            system_id: "BENCH".to_string(),
            num_agents: 40,
            ..FleetConfig::default()
        },
        Arc::new(InMemoryIdentityStore::new()),
        Arc::new(InMemoryCommunicationStore::new()),
        Arc::new(SequenceSeedSource::new()),
    )
    .unwrap();
    let runtime = FleetRuntime::from_container(container);

    rt.block_on(async {
        let roster = runtime.container().identity.roster().to_vec();
        for _ in 0..timeslots {
            runtime.advance_timeslot().await.unwrap();
            runtime.messenger().broadcast(&roster[0], b"sitrep").await.unwrap();
        }
    });
    runtime
}

pub fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("qf-03-verify");
    let rt = tokio::runtime::Runtime::new().unwrap();
    let runtime = populated_runtime(&rt, 10);
    let container = runtime.container();

    let record = rt
        .block_on(container.audit.query(CommunicationFilter::default().limit(1)))
        .unwrap()
        .remove(0)
        .record;

    group.bench_function("verify_single", |b| {
        b.iter(|| black_box(rt.block_on(container.verifier.verify(&record)).unwrap()))
    });

    group.finish();
}

pub fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("qf-03-query");
    let rt = tokio::runtime::Runtime::new().unwrap();
    let runtime = populated_runtime(&rt, 25);
    let container = runtime.container();
    let receiver = container.identity.roster()[1].clone();

    for limit in [10usize, 100] {
        group.throughput(Throughput::Elements(limit as u64));
        group.bench_with_input(BenchmarkId::new("by_receiver", limit), &limit, |b, &limit| {
            let filter = CommunicationFilter::default()
                .receiver(receiver.clone())
                .limit(limit);
            b.iter(|| black_box(rt.block_on(container.audit.query(filter.clone())).unwrap()))
        });
    }

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_verify(c);
    bench_query(c);
}
