//! Benchmarks for indicator implementations and the snapshot builder.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sniper_core::{Bar, BarSeries};
use sniper_indicators::{Ema, Rsi, SnapshotBuilder};

fn generate_test_data(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0)
        .collect()
}

fn generate_series(size: usize) -> BarSeries {
    generate_test_data(size)
        .into_iter()
        .enumerate()
        .map(|(i, p)| Bar::new(i as i64 * 86_400_000, p, p + 1.0, p - 1.0, p, 1_000_000.0))
        .collect()
}

fn benchmark_ema(c: &mut Criterion) {
    let mut group = c.benchmark_group("EMA");

    for size in [1000, 10000, 100000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("span21", size), &data, |b, data| {
            let ema = Ema::new(21);
            b.iter(|| ema.calculate(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_rsi(c: &mut Criterion) {
    let mut group = c.benchmark_group("RSI");

    for size in [1000, 10000, 100000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("period14", size), &data, |b, data| {
            let rsi = Rsi::new(14);
            b.iter(|| rsi.calculate(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_snapshot_builder(c: &mut Criterion) {
    let mut group = c.benchmark_group("SnapshotBuilder");

    for size in [60, 252, 1000].iter() {
        let series = generate_series(*size);

        group.bench_with_input(BenchmarkId::new("build_all", size), &series, |b, series| {
            let builder = SnapshotBuilder::new("bench");
            b.iter(|| builder.build_all(black_box(series)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_ema, benchmark_rsi, benchmark_snapshot_builder);
criterion_main!(benches);
