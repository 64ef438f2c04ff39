//! Error types for estimator construction, fitting, and post-fit access.
//!
//! Three families, matching the three ways a caller can misuse an estimator:
//! - `ParamError`: rejected at construction; the instance never exists.
//! - `InputError`: structurally invalid input rejected at `fit`.
//! - `EstimatorError::NotFitted`: post-fit operation on an unfitted instance.

use thiserror::Error;

/// Errors surfaced by the estimator lifecycle.
#[derive(Debug, Error, PartialEq)]
pub enum EstimatorError {
    #[error("{estimator} is not fitted yet; call fit first")]
    NotFitted { estimator: &'static str },

    #[error("invalid parameters: {0}")]
    InvalidParameters(#[from] ParamError),

    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),
}

/// Constructor-time parameter validation failures.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParamError {
    #[error("{name} must be >= 1")]
    ZeroWindow { name: &'static str },

    #[error("short_window ({short}) must be < long_window ({long})")]
    WindowOrder { short: usize, long: usize },

    #[error("oversold threshold ({oversold}) must be < overbought threshold ({overbought})")]
    ThresholdOrder { oversold: f64, overbought: f64 },

    #[error("threshold {value} is outside the oscillator range [0, 100]")]
    ThresholdRange { value: f64 },

    #[error("edge codes must be distinct and non-zero (rising={rising}, falling={falling})")]
    EdgeCodes { rising: i8, falling: i8 },

    #[error("input column name must not be empty")]
    EmptyColumn,
}

/// Structural problems with an input frame.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("column {0} is not numeric")]
    NotNumeric(String),

    #[error("column {column} has {actual} rows, index has {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("index is not strictly increasing at position {position}")]
    UnorderedIndex { position: usize },

    #[error("duplicate column: {0}")]
    DuplicateColumn(String),

    #[error("frame index ({actual} rows) differs from the fitted index ({expected} rows)")]
    IndexMismatch { expected: usize, actual: usize },
}

/// Errors loading a run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid estimator `{label}`: {source}")]
    Invalid {
        label: String,
        #[source]
        source: ParamError,
    },
}

pub type Result<T, E = EstimatorError> = std::result::Result<T, E>;
