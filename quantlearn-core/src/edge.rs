//! Edge detection on a binary signal series.
//!
//! First difference of the signal: a difference equal to the rising code is a
//! buy, equal to the falling code is a sell. Position 0 has no predecessor and
//! never produces an event; a missing value on either side of a step produces
//! no event.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ParamError;

/// Kind of a crossing event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Buy,
    Sell,
}

/// A detected transition at `index` of the signal series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeEvent {
    pub index: usize,
    pub date: NaiveDate,
    pub kind: EventKind,
}

/// Difference values classified as rising and falling edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeCodes {
    /// Difference marking a rising edge (buy). Default `+1`.
    pub rising: i8,
    /// Difference marking a falling edge (sell). Default `-1`.
    pub falling: i8,
}

impl Default for EdgeCodes {
    fn default() -> Self {
        Self {
            rising: 1,
            falling: -1,
        }
    }
}

/// Stateless edge detector over a signal series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeDetector {
    codes: EdgeCodes,
}

impl EdgeDetector {
    pub fn new(codes: EdgeCodes) -> Result<Self, ParamError> {
        if codes.rising == 0 || codes.falling == 0 || codes.rising == codes.falling {
            return Err(ParamError::EdgeCodes {
                rising: codes.rising,
                falling: codes.falling,
            });
        }
        Ok(Self { codes })
    }

    pub fn codes(&self) -> EdgeCodes {
        self.codes
    }

    /// Index-aligned first difference; `None` at position 0 and wherever a
    /// neighbour is missing.
    pub fn differences(&self, signal: &[Option<i8>]) -> Vec<Option<i8>> {
        let mut out = vec![None; signal.len()];
        for i in 1..signal.len() {
            if let (Some(prev), Some(cur)) = (signal[i - 1], signal[i]) {
                out[i] = Some(cur.saturating_sub(prev));
            }
        }
        out
    }

    /// Classify one difference value.
    pub fn classify(&self, difference: Option<i8>) -> Option<EventKind> {
        match difference {
            Some(d) if d == self.codes.rising => Some(EventKind::Buy),
            Some(d) if d == self.codes.falling => Some(EventKind::Sell),
            _ => None,
        }
    }

    /// Sparse list of events in index order.
    ///
    /// `dates` must be the index the signal is aligned with.
    pub fn detect(&self, signal: &[Option<i8>], dates: &[NaiveDate]) -> Vec<EdgeEvent> {
        debug_assert_eq!(signal.len(), dates.len());
        self.differences(signal)
            .into_iter()
            .zip(dates)
            .enumerate()
            .filter_map(|(index, (d, &date))| {
                self.classify(d).map(|kind| EdgeEvent { index, date, kind })
            })
            .collect()
    }
}
