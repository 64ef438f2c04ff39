//! End-to-end lifecycle scenarios for both computations.
//!
//! Tests:
//! 1. Usage flow: oscillator fit_transform + plot, crossover fit + predict + plot.
//! 2. NotFitted guard on every post-fit operation for every computation.
//! 3. The 12-bar crossover scenario (short=2, long=4).
//! 4. Missing required column fails at fit; short history does not.

use chrono::NaiveDate;
use quantlearn_core::{
    AnyEstimator, ColumnValues, CrossoverSignalModel, EstimatorConfig, EstimatorError, EventKind,
    Frame, InputError, MomentumOscillator, OscillatorParams, PlotOptions, RunConfig,
};

// ──────────────────────────────────────────────
// Helpers
// ──────────────────────────────────────────────

fn dates(n: usize) -> Vec<NaiveDate> {
    let base = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    (0..n)
        .map(|i| base + chrono::Duration::days(i as i64))
        .collect()
}

/// OHLC-ish frame: `open` lags `close` by one bar, plus a volume column.
fn price_frame(closes: &[f64]) -> Frame {
    let n = closes.len();
    let open: Vec<f64> = (0..n)
        .map(|i| if i == 0 { closes[0] } else { closes[i - 1] })
        .collect();
    Frame::new(dates(n))
        .unwrap()
        .with_column("open", ColumnValues::Number(open))
        .unwrap()
        .with_column("close", ColumnValues::Number(closes.to_vec()))
        .unwrap()
        .with_column("volume", ColumnValues::Number(vec![1000.0; n]))
        .unwrap()
}

/// Deterministic pseudo-random walk using a simple LCG.
fn random_walk(n: usize) -> Vec<f64> {
    let mut price = 100.0;
    (0..n)
        .map(|i| {
            let seed = (i as u64).wrapping_mul(6364136223846793005).wrapping_add(1);
            let change = ((seed % 200) as f64 - 100.0) * 0.05;
            price = (price + change).max(10.0);
            price
        })
        .collect()
}

fn all_estimators() -> Vec<AnyEstimator> {
    RunConfig::from_toml(
        r#"
[[estimator]]
type = "momentum_oscillator"
window = 14

[[estimator]]
type = "crossover_signal_model"
short_window = 5
long_window = 20
"#,
    )
    .unwrap()
    .build()
    .unwrap()
}

const SCENARIO: [f64; 12] = [
    10.0, 11.0, 12.0, 11.0, 10.0, 9.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0,
];

// ──────────────────────────────────────────────
// Usage flow
// ──────────────────────────────────────────────

#[test]
fn usage_flow_oscillator_and_crossover() {
    let data = price_frame(&random_walk(300));

    let mut rsi = MomentumOscillator::estimator(14).unwrap();
    let rsi_values = rsi.fit_transform(&data).unwrap();
    assert_eq!(rsi_values.len(), 300);
    let values = rsi_values.numbers("rsi").unwrap();
    assert!(values[..13].iter().all(|v| v.is_nan()));
    assert!(values[13..]
        .iter()
        .filter(|v| !v.is_nan())
        .all(|v| (0.0..=100.0).contains(v)));
    let rsi_plot = rsi.plot(&PlotOptions::default()).unwrap();
    assert_eq!(rsi_plot.title, "RSI (14 days)");

    let mut mac = CrossoverSignalModel::estimator(20, 50).unwrap();
    mac.fit(&data).unwrap();
    let signals = mac.predict(&data).unwrap();
    let signal = signals.signals("signal").unwrap();
    assert_eq!(signal.len(), 300);
    assert!(signal[..49].iter().all(Option::is_none));
    assert!(signal[49..].iter().all(|s| matches!(s, Some(0) | Some(1))));

    let plot = mac.plot(&PlotOptions::default()).unwrap();
    let events = mac.events().unwrap();
    assert_eq!(plot.markers.len(), events.len());
    // Events alternate between buy and sell.
    for pair in events.windows(2) {
        assert_ne!(pair[0].kind, pair[1].kind);
    }
}

// ──────────────────────────────────────────────
// State-machine guard
// ──────────────────────────────────────────────

#[test]
fn never_fitted_instances_fail_with_not_fitted() {
    let data = price_frame(&random_walk(50));
    for est in all_estimators() {
        let kind = est.kind();
        for result in [
            est.transform(&data).map(|_| ()),
            est.predict(&data).map(|_| ()),
            est.plot(&PlotOptions::default()).map(|_| ()),
        ] {
            assert_eq!(
                result.unwrap_err(),
                EstimatorError::NotFitted { estimator: kind }
            );
        }
    }
}

#[test]
fn fit_transform_equals_fit_then_transform() {
    let data = price_frame(&random_walk(120));
    for (mut a, mut b) in all_estimators().into_iter().zip(all_estimators()) {
        let combined = a.fit_transform(&data).unwrap();
        let separate = b.fit(&data).unwrap().transform(&data).unwrap();
        assert!(combined.equivalent(&separate), "{} diverged", a.label());
    }
}

#[test]
fn refit_fully_replaces_prior_state() {
    let first = price_frame(&random_walk(80));
    let second = price_frame(&SCENARIO);

    let mut reused = CrossoverSignalModel::estimator(2, 4).unwrap();
    reused.fit(&first).unwrap();
    reused.fit(&second).unwrap();

    let mut fresh = CrossoverSignalModel::estimator(2, 4).unwrap();
    fresh.fit(&second).unwrap();

    assert!(reused
        .predict(&second)
        .unwrap()
        .equivalent(&fresh.predict(&second).unwrap()));
    // The old frame no longer matches the fitted index.
    assert!(matches!(
        reused.transform(&first),
        Err(EstimatorError::InvalidInput(InputError::IndexMismatch { .. }))
    ));
}

// ──────────────────────────────────────────────
// Crossover scenario
// ──────────────────────────────────────────────

#[test]
fn crossover_scenario_short_2_long_4() {
    let data = price_frame(&SCENARIO);
    let mut mac = CrossoverSignalModel::estimator(2, 4).unwrap();
    let averages = mac.fit_transform(&data).unwrap();

    let short = averages.numbers("short_ma").unwrap();
    let long = averages.numbers("long_ma").unwrap();
    for i in 0..SCENARIO.len() {
        if i >= 1 {
            let expected = (SCENARIO[i - 1] + SCENARIO[i]) / 2.0;
            assert!((short[i] - expected).abs() < 1e-12);
        }
        if i >= 3 {
            let expected = SCENARIO[i - 3..=i].iter().sum::<f64>() / 4.0;
            assert!((long[i] - expected).abs() < 1e-12);
        } else {
            assert!(long[i].is_nan());
        }
    }

    let predicted = mac.predict(&data).unwrap();
    let signal = predicted.signals("signal").unwrap();
    let rises: Vec<usize> = (1..signal.len())
        .filter(|&i| signal[i - 1] == Some(0) && signal[i] == Some(1))
        .collect();
    assert_eq!(rises, vec![8], "exactly one 0 → 1 transition");
    assert_eq!(signal.last(), Some(&Some(1)), "series ends crossed up");

    let events = mac.events().unwrap();
    let buys: Vec<_> = events.iter().filter(|e| e.kind == EventKind::Buy).collect();
    assert_eq!(buys.len(), 1);
    assert_eq!(buys[0].index, 8);
    assert_eq!(buys[0].date, dates(12)[8]);
}

// ──────────────────────────────────────────────
// Input validation
// ──────────────────────────────────────────────

#[test]
fn missing_close_column_fails_fast() {
    let frame = Frame::from_series("open", dates(30), random_walk(30)).unwrap();
    for mut est in all_estimators() {
        assert_eq!(
            est.fit(&frame).unwrap_err(),
            EstimatorError::InvalidInput(InputError::MissingColumn("close".into()))
        );
        assert!(!est.is_fitted());
    }
}

#[test]
fn history_shorter_than_window_is_all_missing() {
    let data = price_frame(&[10.0, 11.0, 12.0]);
    for mut est in all_estimators() {
        let out = est.fit_transform(&data).unwrap();
        assert_eq!(out.len(), 3);
        for column in out.columns() {
            assert!((0..3).all(|i| column.values.is_missing(i)), "{}", column.name);
        }
    }
}

#[test]
fn custom_column_and_thresholds_from_config() {
    let config = EstimatorConfig::MomentumOscillator(OscillatorParams {
        window: 3,
        column: "open".into(),
        overbought: 60.0,
        oversold: 40.0,
    });
    let mut est = quantlearn_core::create_estimator(&config).unwrap();
    let data = price_frame(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    est.fit(&data).unwrap();
    let pred = est.predict(&data).unwrap();
    // `open` is close shifted by one bar: first change is 0, then +1s.
    let overbought = pred.flags("overbought").unwrap();
    assert_eq!(overbought[3], Some(true));
    assert_eq!(overbought[5], Some(true));
}
