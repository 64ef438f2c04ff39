//! Estimator lifecycle: fit, then transform / predict / plot.
//!
//! A `Computation` knows how to learn state from a frame and how to expose
//! that state. An `Estimator` wraps one computation together with a
//! two-state `FitState`; the only way to reach fitted state is through
//! `Estimator::fitted()`, which is the single NotFitted guard for every
//! post-fit operation.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::error::{EstimatorError, InputError, Result};
use crate::frame::Frame;
use crate::plot::{PlotOptions, PlotSpec};

/// Capability interface implemented by every concrete computation.
///
/// Implementations are pure: the same parameters and input frame always
/// produce the same state, and exposing state never mutates it.
pub trait Computation: Send + Sync {
    /// Immutable, validated parameter record.
    type Params: Clone + std::fmt::Debug;
    /// State learned by `fit`.
    type State: Clone + std::fmt::Debug + Send + Sync;

    /// Stable kind name (e.g. "momentum_oscillator").
    const KIND: &'static str;

    fn params(&self) -> &Self::Params;

    /// Instance label used for output naming (e.g. "rsi_14").
    fn label(&self) -> String;

    /// Number of leading positions that cannot hold a value.
    fn lookback(&self) -> usize;

    /// Learn state from `frame`. Only structural problems are errors;
    /// insufficient history yields missing values.
    fn fit(&self, frame: &Frame) -> Result<Self::State, InputError>;

    fn transform(&self, fitted: &Fitted<Self::State>) -> Result<Frame, InputError>;

    fn predict(&self, fitted: &Fitted<Self::State>) -> Result<Frame, InputError>;

    fn plot(&self, fitted: &Fitted<Self::State>, options: &PlotOptions) -> PlotSpec;
}

/// Learned state plus the index it is aligned with.
#[derive(Debug, Clone, PartialEq)]
pub struct Fitted<S> {
    pub index: Vec<NaiveDate>,
    pub state: S,
}

impl<S> Fitted<S> {
    /// Post-fit operations take the same frame that was fitted; outputs are
    /// aligned with it, so a different index is rejected.
    fn check_aligned(&self, frame: &Frame) -> Result<(), InputError> {
        if self.index.as_slice() != frame.index() {
            return Err(InputError::IndexMismatch {
                expected: self.index.len(),
                actual: frame.len(),
            });
        }
        Ok(())
    }
}

/// Lifecycle state. `Fitted` is re-entered (overwritten) by every `fit`.
#[derive(Debug, Clone, PartialEq)]
pub enum FitState<S> {
    Unfitted,
    Fitted(Fitted<S>),
}

/// A computation plus its lifecycle state.
#[derive(Debug, Clone)]
pub struct Estimator<C: Computation> {
    computation: C,
    state: FitState<C::State>,
}

impl<C: Computation> Estimator<C> {
    pub fn new(computation: C) -> Self {
        Self {
            computation,
            state: FitState::Unfitted,
        }
    }

    pub fn computation(&self) -> &C {
        &self.computation
    }

    pub fn params(&self) -> &C::Params {
        self.computation.params()
    }

    pub fn kind(&self) -> &'static str {
        C::KIND
    }

    pub fn label(&self) -> String {
        self.computation.label()
    }

    pub fn is_fitted(&self) -> bool {
        matches!(self.state, FitState::Fitted(_))
    }

    pub fn state(&self) -> &FitState<C::State> {
        &self.state
    }

    /// Recompute state from scratch. Prior state is discarded first, so a
    /// failed fit leaves the instance unfitted.
    pub fn fit(&mut self, frame: &Frame) -> Result<&mut Self> {
        self.state = FitState::Unfitted;

        let rows = frame.len();
        let lookback = self.computation.lookback();
        debug!(estimator = C::KIND, rows, lookback, "fitting");
        if rows <= lookback {
            warn!(
                estimator = C::KIND,
                rows, lookback, "series shorter than lookback; every derived value is missing"
            );
        }

        let state = self.computation.fit(frame)?;
        self.state = FitState::Fitted(Fitted {
            index: frame.index().to_vec(),
            state,
        });
        Ok(self)
    }

    pub fn transform(&self, frame: &Frame) -> Result<Frame> {
        let fitted = self.fitted()?;
        fitted.check_aligned(frame)?;
        Ok(self.computation.transform(fitted)?)
    }

    pub fn fit_transform(&mut self, frame: &Frame) -> Result<Frame> {
        self.fit(frame)?.transform(frame)
    }

    pub fn predict(&self, frame: &Frame) -> Result<Frame> {
        let fitted = self.fitted()?;
        fitted.check_aligned(frame)?;
        Ok(self.computation.predict(fitted)?)
    }

    pub fn plot(&self, options: &PlotOptions) -> Result<PlotSpec> {
        let fitted = self.fitted()?;
        Ok(self.computation.plot(fitted, options))
    }

    /// The single NotFitted guard.
    pub(crate) fn fitted(&self) -> Result<&Fitted<C::State>> {
        match &self.state {
            FitState::Fitted(fitted) => Ok(fitted),
            FitState::Unfitted => Err(EstimatorError::NotFitted { estimator: C::KIND }),
        }
    }
}
