use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use rand::Rng;
use std::hint::black_box;
use std::time::Duration;
use umbrasort::prelude::*;

fn bench_1m_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("1M Strings");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(90)); // Increase time for large sort setup overhead

    // Dataset generation
    let mut rng = rand::rng();
    let count = 1_000_000;

    // Generate ~16MB of string data (avg length 16)
    let random_strings: Vec<String> = (0..count)
        .map(|_| {
            let len = rng.random_range(8..24);
            (0..len).map(|_| rng.random::<char>()).collect()
        })
        .collect();

    // Calculate approximate size for throughput
    let total_bytes: usize = random_strings.iter().map(|s| s.len()).sum();
    group.throughput(Throughput::Bytes(total_bytes as u64));

    // Umbrasort
    group.bench_function("umbrasort (in-place)", |b| {
        b.iter_batched(
            || random_strings.clone(),
            |mut data| umbrasort_mut(black_box(&mut data)),
            BatchSize::LargeInput,
        )
    });

    // Std Sort (Stable)
    group.bench_function("slice::sort (stable)", |b| {
        b.iter_batched(
            || random_strings.clone(),
            |mut data| data.sort(),
            BatchSize::LargeInput,
        )
    });

    // Std Sort Unstable
    group.bench_function("slice::sort_unstable", |b| {
        b.iter_batched(
            || random_strings.clone(),
            |mut data| data.sort_unstable(),
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

fn bench_1m_shared_prefix(c: &mut Criterion) {
    let mut group = c.benchmark_group("1M Shared Prefix");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(90));

    let mut rng = rand::rng();
    let count = 1_000_000;
    let prefix = "https://service.internal.example.com/api/v2/resource/";

    let input: Vec<String> = (0..count)
        .map(|_| {
            let suffix: String = (0..8).map(|_| rng.random_range('a'..='z')).collect();
            format!("{}{}", prefix, suffix)
        })
        .collect();

    let total_bytes: usize = input.iter().map(|s| s.len()).sum();
    group.throughput(Throughput::Bytes(total_bytes as u64));

    group.bench_function("umbrasort (in-place)", |b| {
        b.iter_batched(
            || input.clone(),
            |mut data| umbrasort_mut(black_box(&mut data)),
            BatchSize::LargeInput,
        )
    });

    group.bench_function("slice::sort_unstable", |b| {
        b.iter_batched(
            || input.clone(),
            |mut data| data.sort_unstable(),
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_1m_strings, bench_1m_shared_prefix);
criterion_main!(benches);
