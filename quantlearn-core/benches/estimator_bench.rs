//! Criterion benchmarks for QuantLearn hot paths.
//!
//! Benchmarks:
//! 1. Rolling mean across window sizes
//! 2. Momentum oscillator fit_transform
//! 3. Crossover model fit + predict + plot (edge detection included)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use quantlearn_core::window::rolling_mean;
use quantlearn_core::{CrossoverSignalModel, Frame, MomentumOscillator, PlotOptions};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_closes(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0)
        .collect()
}

fn make_frame(n: usize) -> Frame {
    let base_date = chrono::NaiveDate::from_ymd_opt(2000, 1, 3).unwrap();
    let index = (0..n)
        .map(|i| base_date + chrono::Duration::days(i as i64))
        .collect();
    Frame::from_series("close", index, make_closes(n)).unwrap()
}

// ── Benchmarks ───────────────────────────────────────────────────────

fn bench_rolling_mean(c: &mut Criterion) {
    let closes = make_closes(5_000);
    let mut group = c.benchmark_group("rolling_mean");
    for window in [14usize, 50, 200] {
        group.bench_with_input(BenchmarkId::from_parameter(window), &window, |b, &w| {
            b.iter(|| rolling_mean(black_box(&closes), w))
        });
    }
    group.finish();
}

fn bench_oscillator(c: &mut Criterion) {
    let frame = make_frame(5_000);
    c.bench_function("momentum_oscillator_fit_transform_5000", |b| {
        b.iter(|| {
            let mut est = MomentumOscillator::estimator(14).unwrap();
            est.fit_transform(black_box(&frame)).unwrap()
        })
    });
}

fn bench_crossover(c: &mut Criterion) {
    let frame = make_frame(5_000);
    let options = PlotOptions::default();
    c.bench_function("crossover_fit_predict_plot_5000", |b| {
        b.iter(|| {
            let mut est = CrossoverSignalModel::estimator(50, 200).unwrap();
            est.fit(black_box(&frame)).unwrap();
            let signal = est.predict(&frame).unwrap();
            let plot = est.plot(&options).unwrap();
            (signal, plot)
        })
    });
}

criterion_group!(benches, bench_rolling_mean, bench_oscillator, bench_crossover);
criterion_main!(benches);
