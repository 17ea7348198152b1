//! Benchmarks for the summarizer, correlation engine and quality engine.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use eda_core::prelude::*;
use eda_core::test_fixtures::{all_heuristics_dataset, linear_dataset};

fn bench_summarize(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize_dataset");
    for n_rows in [1_000usize, 10_000, 100_000] {
        let dataset = all_heuristics_dataset(n_rows);
        group.bench_with_input(BenchmarkId::from_parameter(n_rows), &dataset, |b, dataset| {
            b.iter(|| summarize_dataset(black_box(dataset)));
        });
    }
    group.finish();
}

fn bench_correlation(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlation_matrix");
    for n_rows in [1_000usize, 10_000, 100_000] {
        let dataset = linear_dataset(n_rows);
        group.bench_with_input(BenchmarkId::from_parameter(n_rows), &dataset, |b, dataset| {
            b.iter(|| correlation_matrix(black_box(dataset)));
        });
    }
    group.finish();
}

fn bench_quality_flags(c: &mut Criterion) {
    let dataset = all_heuristics_dataset(10_000);
    let summary = summarize_dataset(&dataset);
    let missing = missing_table(&dataset);

    c.bench_function("compute_quality_flags/10000", |b| {
        b.iter(|| {
            compute_quality_flags(
                black_box(&summary),
                black_box(&missing),
                black_box(Some(&dataset)),
            )
        });
    });
}

criterion_group!(
    benches,
    bench_summarize,
    bench_correlation,
    bench_quality_flags
);
criterion_main!(benches);
