//! Criterion benchmarks for twister_core generators and checkpoint text.
//!
//! Measures single-draw throughput for each layer and the cost of encoding
//! and decoding a full checkpoint.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use twister_core::{GaussianRng, IntegerRng, UniformRng};

/// Benchmark raw draws across a refill boundary.
fn bench_draws(c: &mut Criterion) {
    let mut group = c.benchmark_group("draws");

    group.bench_function("next_i64", |b| {
        let mut rng = IntegerRng::new(42);
        b.iter(|| black_box(rng.next_i64()));
    });

    group.bench_function("next_uniform", |b| {
        let mut rng = UniformRng::new(42, 0.0, 1.0);
        b.iter(|| black_box(rng.next_uniform()));
    });

    group.bench_function("next_gaussian", |b| {
        let mut rng = GaussianRng::new(42, 0.0, 1.0);
        b.iter(|| black_box(rng.next_gaussian()));
    });

    group.finish();
}

/// Benchmark batch fills of increasing size.
fn bench_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill_gaussian");

    for size in [100, 10_000, 1_000_000] {
        let mut buffer = vec![0.0; size];
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            let mut rng = GaussianRng::new(42, 0.0, 1.0);
            b.iter(|| rng.fill_gaussian(black_box(&mut buffer)));
        });
    }

    group.finish();
}

/// Benchmark checkpoint encode/decode.
fn bench_state_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("state_text");
    let rng = GaussianRng::new(42, 0.0, 1.0);
    let text = rng.to_state_string();

    group.bench_function("encode_gaussian", |b| {
        b.iter(|| black_box(rng.to_state_string()));
    });

    group.bench_function("decode_gaussian", |b| {
        b.iter(|| GaussianRng::from_state_str(black_box(&text)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_draws, bench_fill, bench_state_text);
criterion_main!(benches);
