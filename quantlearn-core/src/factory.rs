//! Closed set of estimators, selected at construction from configuration.
//!
//! `AnyEstimator` forwards every lifecycle operation to the wrapped
//! `Estimator<C>`, so every variant shares the same NotFitted guard.

use crate::config::EstimatorConfig;
use crate::error::{ParamError, Result};
use crate::estimator::Estimator;
use crate::frame::Frame;
use crate::indicators::MomentumOscillator;
use crate::models::CrossoverSignalModel;
use crate::plot::{PlotOptions, PlotSpec};

/// Every concrete computation, each behind its own lifecycle.
#[derive(Debug, Clone)]
pub enum AnyEstimator {
    MomentumOscillator(Estimator<MomentumOscillator>),
    CrossoverSignalModel(Estimator<CrossoverSignalModel>),
}

impl AnyEstimator {
    pub fn kind(&self) -> &'static str {
        match self {
            AnyEstimator::MomentumOscillator(e) => e.kind(),
            AnyEstimator::CrossoverSignalModel(e) => e.kind(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            AnyEstimator::MomentumOscillator(e) => e.label(),
            AnyEstimator::CrossoverSignalModel(e) => e.label(),
        }
    }

    pub fn is_fitted(&self) -> bool {
        match self {
            AnyEstimator::MomentumOscillator(e) => e.is_fitted(),
            AnyEstimator::CrossoverSignalModel(e) => e.is_fitted(),
        }
    }

    pub fn fit(&mut self, frame: &Frame) -> Result<&mut Self> {
        match self {
            AnyEstimator::MomentumOscillator(e) => {
                e.fit(frame)?;
            }
            AnyEstimator::CrossoverSignalModel(e) => {
                e.fit(frame)?;
            }
        }
        Ok(self)
    }

    pub fn transform(&self, frame: &Frame) -> Result<Frame> {
        match self {
            AnyEstimator::MomentumOscillator(e) => e.transform(frame),
            AnyEstimator::CrossoverSignalModel(e) => e.transform(frame),
        }
    }

    pub fn fit_transform(&mut self, frame: &Frame) -> Result<Frame> {
        self.fit(frame)?.transform(frame)
    }

    pub fn predict(&self, frame: &Frame) -> Result<Frame> {
        match self {
            AnyEstimator::MomentumOscillator(e) => e.predict(frame),
            AnyEstimator::CrossoverSignalModel(e) => e.predict(frame),
        }
    }

    pub fn plot(&self, options: &PlotOptions) -> Result<PlotSpec> {
        match self {
            AnyEstimator::MomentumOscillator(e) => e.plot(options),
            AnyEstimator::CrossoverSignalModel(e) => e.plot(options),
        }
    }
}

impl From<Estimator<MomentumOscillator>> for AnyEstimator {
    fn from(estimator: Estimator<MomentumOscillator>) -> Self {
        AnyEstimator::MomentumOscillator(estimator)
    }
}

impl From<Estimator<CrossoverSignalModel>> for AnyEstimator {
    fn from(estimator: Estimator<CrossoverSignalModel>) -> Self {
        AnyEstimator::CrossoverSignalModel(estimator)
    }
}

/// Build an unfitted estimator from its configuration.
pub fn create_estimator(config: &EstimatorConfig) -> Result<AnyEstimator, ParamError> {
    match config {
        EstimatorConfig::MomentumOscillator(params) => Ok(Estimator::new(
            MomentumOscillator::new(params.clone())?,
        )
        .into()),
        EstimatorConfig::CrossoverSignalModel(params) => Ok(Estimator::new(
            CrossoverSignalModel::new(params.clone())?,
        )
        .into()),
    }
}
