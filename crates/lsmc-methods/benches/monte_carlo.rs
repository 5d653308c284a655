use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lsmc_instruments::OptionType;
use lsmc_math::GaussianRng;
use lsmc_methods::{ContinuationRule, Discounting, LongstaffSchwartz, SimulationParameters};
use std::hint::black_box;

fn params(paths: usize, steps: usize) -> SimulationParameters {
    SimulationParameters::new(100.0, 100.0, 0.05, 0.20, 1.0, paths, steps, OptionType::Put)
        .expect("benchmark parameters should be valid")
}

fn bench_lsmc_paths(c: &mut Criterion) {
    let engine = LongstaffSchwartz::new();
    let mut group = c.benchmark_group("lsmc_paths");
    group.sample_size(10);

    for paths in [10_000, 50_000, 100_000].iter() {
        let p = params(*paths, 100);
        group.bench_with_input(BenchmarkId::from_parameter(paths), paths, |b, _| {
            b.iter(|| {
                let outcome = engine
                    .price(black_box(&p), GaussianRng::standard(42))
                    .expect("pricing should succeed");
                black_box(outcome.price)
            })
        });
    }

    group.finish();
}

fn bench_sequential_vs_parallel(c: &mut Criterion) {
    let engine = LongstaffSchwartz::new()
        .with_continuation_rule(ContinuationRule::Regression)
        .with_discounting(Discounting::PerStep);
    let p = params(100_000, 100);
    let mut group = c.benchmark_group("lsmc_generation");
    group.sample_size(10);

    group.bench_function("sequential", |b| {
        b.iter(|| {
            engine
                .price(black_box(&p), GaussianRng::standard(42))
                .expect("pricing should succeed")
                .price
        })
    });
    group.bench_function("parallel", |b| {
        b.iter(|| {
            engine
                .price_parallel(black_box(&p), 42, 4_096)
                .expect("pricing should succeed")
                .price
        })
    });

    group.finish();
}

criterion_group!(benches, bench_lsmc_paths, bench_sequential_vs_parallel);
criterion_main!(benches);
