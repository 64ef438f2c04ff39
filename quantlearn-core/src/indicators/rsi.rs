//! Momentum oscillator (RSI over simple rolling means).
//!
//! avg_gain = rolling_mean(gain, window), avg_loss = rolling_mean(loss, window)
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: window - 1 (position 0 counts as no movement).
//! Edge cases: avg_loss == 0 with gains → 100; avg_gain == avg_loss == 0 → missing.

use serde::{Deserialize, Serialize};

use crate::error::{InputError, ParamError};
use crate::estimator::{Computation, Estimator, Fitted};
use crate::frame::{ColumnValues, Frame};
use crate::plot::{PlotOptions, PlotSpec};
use crate::window::{gain_loss_split, rolling_mean};

/// Oscillator parameters. Thresholds are closed-open: a value strictly above
/// `overbought` or strictly below `oversold` is flagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OscillatorParams {
    /// Rolling window length. Default 14.
    pub window: usize,
    /// Input column. Default "close".
    pub column: String,
    /// Overbought threshold. Default 70.
    pub overbought: f64,
    /// Oversold threshold. Default 30.
    pub oversold: f64,
}

impl Default for OscillatorParams {
    fn default() -> Self {
        Self {
            window: 14,
            column: "close".to_string(),
            overbought: 70.0,
            oversold: 30.0,
        }
    }
}

impl OscillatorParams {
    pub fn with_window(window: usize) -> Self {
        Self {
            window,
            ..Self::default()
        }
    }
}

/// Learned oscillator series.
#[derive(Debug, Clone, PartialEq)]
pub struct OscillatorState {
    pub avg_gain: Vec<f64>,
    pub avg_loss: Vec<f64>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct MomentumOscillator {
    params: OscillatorParams,
}

impl MomentumOscillator {
    pub fn new(params: OscillatorParams) -> Result<Self, ParamError> {
        if params.window == 0 {
            return Err(ParamError::ZeroWindow { name: "window" });
        }
        if params.column.is_empty() {
            return Err(ParamError::EmptyColumn);
        }
        for value in [params.oversold, params.overbought] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ParamError::ThresholdRange { value });
            }
        }
        if params.oversold >= params.overbought {
            return Err(ParamError::ThresholdOrder {
                oversold: params.oversold,
                overbought: params.overbought,
            });
        }
        Ok(Self { params })
    }

    /// Unfitted estimator with the given window and default thresholds.
    pub fn estimator(window: usize) -> Result<Estimator<Self>, ParamError> {
        Ok(Estimator::new(Self::new(OscillatorParams::with_window(window))?))
    }

    fn flags(&self, values: &[f64]) -> (Vec<Option<bool>>, Vec<Option<bool>>) {
        let flag = |v: f64, hit: bool| if v.is_nan() { None } else { Some(hit) };
        let overbought = values
            .iter()
            .map(|&v| flag(v, v > self.params.overbought))
            .collect();
        let oversold = values
            .iter()
            .map(|&v| flag(v, v < self.params.oversold))
            .collect();
        (overbought, oversold)
    }
}

/// Oscillator value for one position under the zero-loss policy.
pub fn oscillator_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_gain.is_nan() || avg_loss.is_nan() {
        f64::NAN
    } else if avg_loss == 0.0 && avg_gain == 0.0 {
        f64::NAN // flat window: no movement to measure
    } else if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

impl Computation for MomentumOscillator {
    type Params = OscillatorParams;
    type State = OscillatorState;
    const KIND: &'static str = "momentum_oscillator";

    fn params(&self) -> &OscillatorParams {
        &self.params
    }

    fn label(&self) -> String {
        format!("rsi_{}", self.params.window)
    }

    fn lookback(&self) -> usize {
        self.params.window - 1
    }

    fn fit(&self, frame: &Frame) -> Result<OscillatorState, InputError> {
        let close = frame.numbers(&self.params.column)?;
        let (gain, loss) = gain_loss_split(close);
        let avg_gain = rolling_mean(&gain, self.params.window);
        let avg_loss = rolling_mean(&loss, self.params.window);
        let values = avg_gain
            .iter()
            .zip(&avg_loss)
            .map(|(&g, &l)| oscillator_value(g, l))
            .collect();
        Ok(OscillatorState {
            avg_gain,
            avg_loss,
            values,
        })
    }

    fn transform(&self, fitted: &Fitted<OscillatorState>) -> Result<Frame, InputError> {
        Frame::from_series("rsi", fitted.index.clone(), fitted.state.values.clone())
    }

    fn predict(&self, fitted: &Fitted<OscillatorState>) -> Result<Frame, InputError> {
        let (overbought, oversold) = self.flags(&fitted.state.values);
        Frame::new(fitted.index.clone())?
            .with_column("overbought", ColumnValues::Flag(overbought))?
            .with_column("oversold", ColumnValues::Flag(oversold))
    }

    fn plot(&self, fitted: &Fitted<OscillatorState>, options: &PlotOptions) -> PlotSpec {
        PlotSpec::new(
            format!("RSI ({} days)", self.params.window),
            fitted.index.clone(),
        )
        .line("RSI", fitted.state.values.clone())
        .guide("oversold", self.params.oversold)
        .guide("overbought", self.params.overbought)
        .with_options(options)
    }
}

impl Estimator<MomentumOscillator> {
    /// Overbought/oversold flags over the fitted series.
    ///
    /// Same output as `predict`, without re-supplying the input frame.
    pub fn signal(&self) -> crate::error::Result<Frame> {
        let fitted = self.fitted()?;
        Ok(self.computation().predict(fitted)?)
    }
}
