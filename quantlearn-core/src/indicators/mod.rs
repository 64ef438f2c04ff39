//! Technical indicators.
//!
//! Indicators expose a derived numeric series through `transform` and
//! threshold flags through `predict`. All are built on `crate::window`.

pub mod rsi;

pub use rsi::{oscillator_value, MomentumOscillator, OscillatorParams, OscillatorState};
