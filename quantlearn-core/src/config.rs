//! Serializable run configuration (TOML).
//!
//! ```toml
//! [data]
//! path = "prices.csv"
//! date_column = "date"
//!
//! [[estimator]]
//! type = "momentum_oscillator"
//! window = 14
//!
//! [[estimator]]
//! type = "crossover_signal_model"
//! short_window = 50
//! long_window = 200
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::factory::{create_estimator, AnyEstimator};
use crate::indicators::OscillatorParams;
use crate::models::CrossoverParams;

/// One estimator entry, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EstimatorConfig {
    MomentumOscillator(OscillatorParams),
    CrossoverSignalModel(CrossoverParams),
}

/// Where the input series comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// CSV file. May be supplied on the command line instead.
    pub path: Option<PathBuf>,
    /// Name of the date column (matched case-insensitively).
    pub date_column: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: None,
            date_column: "date".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default = "default_estimators", rename = "estimator")]
    pub estimators: Vec<EstimatorConfig>,
}

/// RSI(14) plus a 50/200 crossover.
fn default_estimators() -> Vec<EstimatorConfig> {
    vec![
        EstimatorConfig::MomentumOscillator(OscillatorParams::default()),
        EstimatorConfig::CrossoverSignalModel(CrossoverParams::default()),
    ]
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            estimators: default_estimators(),
        }
    }
}

impl RunConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let config: RunConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Constructs every estimator once so invalid parameters surface before
    /// any data is read.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build().map(|_| ())
    }

    /// Unfitted estimators in configuration order.
    pub fn build(&self) -> Result<Vec<AnyEstimator>, ConfigError> {
        self.estimators
            .iter()
            .enumerate()
            .map(|(i, config)| {
                create_estimator(config).map_err(|source| ConfigError::Invalid {
                    label: format!("estimator[{i}]"),
                    source,
                })
            })
            .collect()
    }
}
