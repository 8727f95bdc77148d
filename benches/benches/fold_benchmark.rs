//! Consolidation and selection benchmarks over synthetic daily series.
//!
//! Run with: `cargo bench --package tsfold-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use tsfold_bench::{SeriesConfig, synthetic_csv, synthetic_series};
use tsfold_lib::{Engine, FilterList, JobConfig, OutputMode, Period};

const SERIES: SeriesConfig = SeriesConfig {
    symbols: 50,
    days: 2_500,
};

fn consolidate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("consolidate");
    group.throughput(Throughput::Elements(SERIES.records() as u64));

    for period in [Period::Week, Period::Month, Period::Year] {
        for shards in [1, 8] {
            let engine = Engine::new(JobConfig {
                shards,
                ..JobConfig::consolidate(period)
            })
            .unwrap();
            group.bench_with_input(
                BenchmarkId::new(period.as_str(), shards),
                &engine,
                |b, engine| {
                    b.iter_batched(
                        || synthetic_series(SERIES),
                        |records| black_box(engine.run(records).unwrap()),
                        criterion::BatchSize::LargeInput,
                    );
                },
            );
        }
    }
    group.finish();
}

fn select_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("select");
    group.throughput(Throughput::Elements(SERIES.records() as u64));

    for mode in [OutputMode::Combine, OutputMode::All] {
        let engine = Engine::new(JobConfig {
            mode,
            shards: 8,
            ..JobConfig::select(Period::Month, FilterList::default())
        })
        .unwrap();
        group.bench_with_input(BenchmarkId::new("month", mode), &engine, |b, engine| {
            b.iter_batched(
                || synthetic_series(SERIES),
                |records| black_box(engine.run(records).unwrap()),
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn ingest_benchmark(c: &mut Criterion) {
    let csv = synthetic_csv(SERIES);
    let engine = Engine::new(JobConfig::consolidate(Period::Month)).unwrap();

    let mut group = c.benchmark_group("ingest");
    group.throughput(Throughput::Bytes(csv.len() as u64));
    group.bench_function("csv-month", |b| {
        b.iter(|| black_box(engine.run_reader(csv.as_bytes(), "").unwrap()));
    });
    group.finish();
}

criterion_group!(benches, consolidate_benchmark, select_benchmark, ingest_benchmark);
criterion_main!(benches);
