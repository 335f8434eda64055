// SPDX-License-Identifier: Apache-2.0

//! Lower bound benchmarks
//!
//! Compares partition widths 1/4/8 on the scalar probe path against the
//! accelerated entry point and `slice::partition_point`.
//!
//! Run with: cargo bench --bench lower_bound

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use narysearch::{lower_bound_accelerated, lower_bound_n, Identity, Lanewise, Less};

fn sorted_keys(len: usize) -> Vec<f32> {
    (0..len).map(|i| (i / 2) as f32 * 0.5).collect()
}

/// Deterministic spread of query values across the key range.
fn queries(len: usize, count: usize) -> Vec<f32> {
    (0..count)
        .map(|i| ((i * 7919) % (len.max(1) / 2 + 1)) as f32 * 0.5 + 0.25)
        .collect()
}

fn bench_widths(c: &mut Criterion) {
    let mut group = c.benchmark_group("lower_bound_f32");

    for size in [1_000, 100_000, 4_000_000] {
        let keys = sorted_keys(size);
        let values = queries(size, 1024);
        let key = |e: &f32| *e;

        group.bench_with_input(BenchmarkId::new("partition_point", size), &size, |b, _| {
            b.iter(|| {
                for v in &values {
                    black_box(keys.partition_point(|e| e < v));
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("width_1", size), &size, |b, _| {
            b.iter(|| {
                for v in &values {
                    black_box(lower_bound_n::<1, _, _, _, _>(&keys, v, &Less, &key));
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("width_4", size), &size, |b, _| {
            b.iter(|| {
                for v in &values {
                    black_box(lower_bound_n::<4, _, _, _, _>(&keys, v, &Less, &key));
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("width_8", size), &size, |b, _| {
            b.iter(|| {
                for v in &values {
                    black_box(lower_bound_n::<8, _, _, _, _>(&keys, v, &Less, &key));
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("accelerated_packed", size), &size, |b, _| {
            b.iter(|| {
                for v in &values {
                    black_box(lower_bound_accelerated(&keys, v, &Less, &Identity));
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("accelerated_group", size), &size, |b, _| {
            let lanewise = Lanewise(key);
            b.iter(|| {
                for v in &values {
                    black_box(lower_bound_accelerated(&keys, v, &Less, &lanewise));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_widths);
criterion_main!(benches);
