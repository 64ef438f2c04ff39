//! Look-ahead contamination tests.
//!
//! No derived value at position t may depend on input from t+1 or later.
//!
//! Method: fit on a truncated series (0..100) and on the full series (0..200).
//! Every output column must agree on positions 0..100.

use chrono::NaiveDate;
use quantlearn_core::{
    create_estimator, AnyEstimator, ColumnValues, CrossoverParams, EstimatorConfig, Frame,
    OscillatorParams,
};

/// Deterministic pseudo-random walk using a simple LCG.
fn make_test_frame(n: usize) -> Frame {
    let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let mut price = 100.0;
    let mut closes = Vec::with_capacity(n);
    for i in 0..n {
        let seed = (i as u64).wrapping_mul(6364136223846793005).wrapping_add(1);
        let change = ((seed % 200) as f64 - 100.0) * 0.05; // -5.0 to +5.0
        price = (price + change).max(10.0);
        closes.push(price);
    }
    let index = (0..n)
        .map(|i| base_date + chrono::Duration::days(i as i64))
        .collect();
    Frame::from_series("close", index, closes).unwrap()
}

fn truncate(frame: &Frame, len: usize) -> Frame {
    Frame::from_series(
        "close",
        frame.index()[..len].to_vec(),
        frame.numbers("close").unwrap()[..len].to_vec(),
    )
    .unwrap()
}

fn assert_no_lookahead(make: impl Fn() -> AnyEstimator, full: &Frame, truncated_len: usize) {
    let truncated = truncate(full, truncated_len);

    let mut on_full = make();
    let mut on_truncated = make();
    let full_out = [
        on_full.fit_transform(full).unwrap(),
        on_full.predict(full).unwrap(),
    ];
    let truncated_out = [
        on_truncated.fit_transform(&truncated).unwrap(),
        on_truncated.predict(&truncated).unwrap(),
    ];

    for (f, t) in full_out.iter().zip(&truncated_out) {
        assert_eq!(t.len(), truncated_len);
        for (fc, tc) in f.columns().iter().zip(t.columns()) {
            assert_eq!(fc.name, tc.name);
            for i in 0..truncated_len {
                assert_eq!(
                    fc.values.is_missing(i),
                    tc.values.is_missing(i),
                    "{}: missing mismatch in {} at {i}",
                    on_full.label(),
                    fc.name
                );
            }
        }
        let head = truncate_columns(f, truncated_len);
        assert!(head.equivalent(t), "{}: values diverge", on_full.label());
    }
}

/// Copy of `frame` restricted to its first `len` rows.
fn truncate_columns(frame: &Frame, len: usize) -> Frame {
    let mut out = Frame::new(frame.index()[..len].to_vec()).unwrap();
    for column in frame.columns() {
        let values = match &column.values {
            ColumnValues::Number(v) => ColumnValues::Number(v[..len].to_vec()),
            ColumnValues::Flag(v) => ColumnValues::Flag(v[..len].to_vec()),
            ColumnValues::Signal(v) => ColumnValues::Signal(v[..len].to_vec()),
        };
        out.push_column(column.name.clone(), values).unwrap();
    }
    out
}

#[test]
fn momentum_oscillator_no_lookahead() {
    let full = make_test_frame(200);
    for window in [2, 14, 30] {
        assert_no_lookahead(
            || {
                create_estimator(&EstimatorConfig::MomentumOscillator(
                    OscillatorParams::with_window(window),
                ))
                .unwrap()
            },
            &full,
            100,
        );
    }
}

#[test]
fn crossover_no_lookahead() {
    let full = make_test_frame(200);
    for (short, long) in [(2, 4), (10, 50), (20, 99)] {
        assert_no_lookahead(
            || {
                create_estimator(&EstimatorConfig::CrossoverSignalModel(
                    CrossoverParams::with_windows(short, long),
                ))
                .unwrap()
            },
            &full,
            100,
        );
    }
}
