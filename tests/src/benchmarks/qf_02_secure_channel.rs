//! # QF-02 Secure Channel Benchmarks
//!
//! Encryption and replay cost by message size.

use chrono::Utc;
use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use qf_01_fleet_identity::{derive, BadgeGenerator};
use qf_02_secure_channel::{SecureChannel, SecureChannelApi};
use rand::RngCore;
use shared_types::{AgentSerial, BadgeSeed, Timeslot};

fn random_message(size: usize) -> Vec<u8> {
    let mut message = vec![0u8; size];
    rand::thread_rng().fill_bytes(&mut message);
    message
}

pub fn bench_encrypt_decrypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("qf-02-channel");
    let channel = SecureChannel::new();
    let generator = BadgeGenerator::default();
    let sender = generator.issue(
        &AgentSerial::new("AGENT-TX").unwrap(),
        Timeslot::new(1),
        BadgeSeed::from_bytes([1; 32]),
        Utc::now(),
    );
    let receiver = generator.issue(
        &AgentSerial::new("AGENT-RX").unwrap(),
        Timeslot::new(1),
        BadgeSeed::from_bytes([2; 32]),
        Utc::now(),
    );
    let key = derive(&sender.badge);

    for size in [64usize, 1024, 16 * 1024] {
        let message = random_message(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("encrypt", size), &message, |b, m| {
            b.iter(|| black_box(channel.encrypt(m, &key)))
        });

        group.bench_with_input(BenchmarkId::new("send", size), &message, |b, m| {
            b.iter(|| black_box(channel.send(&sender, &receiver, m)))
        });

        let record = channel.send(&sender, &receiver, &message);
        let material = sender.key_material();
        group.bench_with_input(BenchmarkId::new("open", size), &record, |b, r| {
            b.iter(|| black_box(channel.open(r, &material).unwrap()))
        });
    }

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_encrypt_decrypt(c);
}
