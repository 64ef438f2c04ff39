//! QuantLearn Core: estimators over ordered price series.
//!
//! This crate contains:
//! - `Frame`: date-indexed, index-aligned columns with explicit missing values
//! - Windowed statistics (rolling mean, gain/loss split)
//! - Edge detection on binary signals (buy/sell events)
//! - The fit → transform / predict / plot lifecycle (`Estimator`)
//! - Concrete computations: momentum oscillator, moving average crossover
//! - Renderer-agnostic plot descriptions
//! - TOML run configuration and the estimator factory
//!
//! Everything is synchronous and pure. Distinct estimator instances share no
//! state and can be fitted in parallel; a single instance must not be fitted
//! from two threads at once.

pub mod config;
pub mod edge;
pub mod error;
pub mod estimator;
pub mod factory;
pub mod frame;
pub mod indicators;
pub mod models;
pub mod plot;
pub mod window;

pub use config::{DataConfig, EstimatorConfig, RunConfig};
pub use edge::{EdgeCodes, EdgeDetector, EdgeEvent, EventKind};
pub use error::{ConfigError, EstimatorError, InputError, ParamError};
pub use estimator::{Computation, Estimator, FitState, Fitted};
pub use factory::{create_estimator, AnyEstimator};
pub use frame::{Column, ColumnValues, Frame};
pub use indicators::{MomentumOscillator, OscillatorParams};
pub use models::{CrossoverParams, CrossoverSignalModel};
pub use plot::{Guide, Marker, PlotLine, PlotOptions, PlotSpec};

/// Build a single-column `close` frame on consecutive days from 2024-01-02.
#[cfg(test)]
pub(crate) fn make_frame(closes: &[f64]) -> Frame {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let index = (0..closes.len())
        .map(|i| base_date + chrono::Duration::days(i as i64))
        .collect();
    Frame::from_series("close", index, closes.to_vec()).unwrap()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub(crate) fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for numeric tests.
#[cfg(test)]
pub(crate) const DEFAULT_EPSILON: f64 = 1e-10;
