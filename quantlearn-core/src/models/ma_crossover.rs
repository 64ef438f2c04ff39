//! Moving average crossover model.
//!
//! Position signal is 1 while the short MA is above the long MA and 0
//! otherwise. Changes in the position signal are buy (0 → 1) and sell
//! (1 → 0) events, used only to annotate the plot.

use serde::{Deserialize, Serialize};

use crate::edge::{EdgeCodes, EdgeDetector, EdgeEvent};
use crate::error::{InputError, ParamError};
use crate::estimator::{Computation, Estimator, Fitted};
use crate::frame::{ColumnValues, Frame};
use crate::plot::{Marker, PlotOptions, PlotSpec};
use crate::window::rolling_mean;

/// Crossover parameters.
///
/// # Parameters
/// - `short_window`: short MA window (default 50)
/// - `long_window`: long MA window (default 200), must exceed `short_window`
/// - `column`: input column (default "close")
/// - `edge_codes`: signal differences read as buy/sell (default +1 / -1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossoverParams {
    pub short_window: usize,
    pub long_window: usize,
    pub column: String,
    pub edge_codes: EdgeCodes,
}

impl Default for CrossoverParams {
    fn default() -> Self {
        Self {
            short_window: 50,
            long_window: 200,
            column: "close".to_string(),
            edge_codes: EdgeCodes::default(),
        }
    }
}

impl CrossoverParams {
    pub fn with_windows(short_window: usize, long_window: usize) -> Self {
        Self {
            short_window,
            long_window,
            ..Self::default()
        }
    }
}

/// Learned moving averages and position signal.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossoverState {
    /// Input prices, kept for the plot's price line.
    pub close: Vec<f64>,
    pub short_ma: Vec<f64>,
    pub long_ma: Vec<f64>,
    pub signal: Vec<Option<i8>>,
}

#[derive(Debug, Clone)]
pub struct CrossoverSignalModel {
    params: CrossoverParams,
    detector: EdgeDetector,
}

impl CrossoverSignalModel {
    pub fn new(params: CrossoverParams) -> Result<Self, ParamError> {
        if params.short_window == 0 {
            return Err(ParamError::ZeroWindow {
                name: "short_window",
            });
        }
        if params.short_window >= params.long_window {
            return Err(ParamError::WindowOrder {
                short: params.short_window,
                long: params.long_window,
            });
        }
        if params.column.is_empty() {
            return Err(ParamError::EmptyColumn);
        }
        let detector = EdgeDetector::new(params.edge_codes)?;
        Ok(Self { params, detector })
    }

    /// Unfitted estimator with the given windows and default settings.
    pub fn estimator(
        short_window: usize,
        long_window: usize,
    ) -> Result<Estimator<Self>, ParamError> {
        Ok(Estimator::new(Self::new(CrossoverParams::with_windows(
            short_window,
            long_window,
        ))?))
    }

    pub fn detector(&self) -> &EdgeDetector {
        &self.detector
    }

    fn events(&self, fitted: &Fitted<CrossoverState>) -> Vec<EdgeEvent> {
        self.detector.detect(&fitted.state.signal, &fitted.index)
    }
}

/// 1 where `short > long`, 0 otherwise, missing where either is missing.
pub fn position_signal(short_ma: &[f64], long_ma: &[f64]) -> Vec<Option<i8>> {
    short_ma
        .iter()
        .zip(long_ma)
        .map(|(&s, &l)| {
            if s.is_nan() || l.is_nan() {
                None
            } else {
                Some(i8::from(s > l))
            }
        })
        .collect()
}

impl Computation for CrossoverSignalModel {
    type Params = CrossoverParams;
    type State = CrossoverState;
    const KIND: &'static str = "crossover_signal_model";

    fn params(&self) -> &CrossoverParams {
        &self.params
    }

    fn label(&self) -> String {
        format!(
            "ma_crossover_{}_{}",
            self.params.short_window, self.params.long_window
        )
    }

    fn lookback(&self) -> usize {
        self.params.long_window - 1
    }

    fn fit(&self, frame: &Frame) -> Result<CrossoverState, InputError> {
        let close = frame.numbers(&self.params.column)?;
        let short_ma = rolling_mean(close, self.params.short_window);
        let long_ma = rolling_mean(close, self.params.long_window);
        let signal = position_signal(&short_ma, &long_ma);
        Ok(CrossoverState {
            close: close.to_vec(),
            short_ma,
            long_ma,
            signal,
        })
    }

    fn transform(&self, fitted: &Fitted<CrossoverState>) -> Result<Frame, InputError> {
        Frame::new(fitted.index.clone())?
            .with_column("short_ma", ColumnValues::Number(fitted.state.short_ma.clone()))?
            .with_column("long_ma", ColumnValues::Number(fitted.state.long_ma.clone()))
    }

    fn predict(&self, fitted: &Fitted<CrossoverState>) -> Result<Frame, InputError> {
        Frame::new(fitted.index.clone())?
            .with_column("signal", ColumnValues::Signal(fitted.state.signal.clone()))
    }

    fn plot(&self, fitted: &Fitted<CrossoverState>, options: &PlotOptions) -> PlotSpec {
        let state = &fitted.state;
        let mut spec = PlotSpec::new("Moving Average Crossover", fitted.index.clone());
        if options.include_price {
            spec = spec.line("Price", state.close.clone());
        }
        spec.line(format!("{}MA", self.params.short_window), state.short_ma.clone())
            .line(format!("{}MA", self.params.long_window), state.long_ma.clone())
            .markers(
                self.events(fitted)
                    .iter()
                    .map(|event| Marker::at(event, &state.short_ma)),
            )
            .with_options(options)
    }
}

impl Estimator<CrossoverSignalModel> {
    /// Buy/sell crossing events of the fitted position signal, in index order.
    pub fn events(&self) -> crate::error::Result<Vec<EdgeEvent>> {
        let fitted = self.fitted()?;
        Ok(self.computation().events(fitted))
    }
}
