//! Renderer-agnostic plot descriptions.
//!
//! A `PlotSpec` lists what to draw (lines, horizontal guides, event markers)
//! and a title. Drawing it is the caller's business.

use chrono::NaiveDate;
use serde::Serialize;

use crate::edge::{EdgeEvent, EventKind};

/// Caller-supplied plot options.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOptions {
    /// Replaces the computation's default title.
    pub title: Option<String>,
    /// Include the raw price line where the computation has one.
    pub include_price: bool,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            title: None,
            include_price: true,
        }
    }
}

/// One series to draw against the shared index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotLine {
    pub label: String,
    pub values: Vec<f64>,
}

/// A horizontal reference line (e.g. an oscillator threshold).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Guide {
    pub label: String,
    pub level: f64,
}

/// An event marker placed at `(date, value)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub index: usize,
    pub date: NaiveDate,
    pub value: f64,
    pub kind: EventKind,
}

impl Marker {
    /// Place an edge event at the value of `anchor` at the event's index.
    pub fn at(event: &EdgeEvent, anchor: &[f64]) -> Self {
        Self {
            index: event.index,
            date: event.date,
            value: anchor.get(event.index).copied().unwrap_or(f64::NAN),
            kind: event.kind,
        }
    }
}

/// Complete description of a plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSpec {
    pub title: String,
    pub index: Vec<NaiveDate>,
    pub lines: Vec<PlotLine>,
    pub guides: Vec<Guide>,
    pub markers: Vec<Marker>,
}

impl PlotSpec {
    pub fn new(title: impl Into<String>, index: Vec<NaiveDate>) -> Self {
        Self {
            title: title.into(),
            index,
            lines: Vec::new(),
            guides: Vec::new(),
            markers: Vec::new(),
        }
    }

    pub fn line(mut self, label: impl Into<String>, values: Vec<f64>) -> Self {
        self.lines.push(PlotLine {
            label: label.into(),
            values,
        });
        self
    }

    pub fn guide(mut self, label: impl Into<String>, level: f64) -> Self {
        self.guides.push(Guide {
            label: label.into(),
            level,
        });
        self
    }

    pub fn markers(mut self, markers: impl IntoIterator<Item = Marker>) -> Self {
        self.markers.extend(markers);
        self
    }

    /// Apply the caller's title override, if any.
    pub fn with_options(mut self, options: &PlotOptions) -> Self {
        if let Some(title) = &options.title {
            self.title = title.clone();
        }
        self
    }

    pub fn line_by_label(&self, label: &str) -> Option<&PlotLine> {
        self.lines.iter().find(|l| l.label == label)
    }

    pub fn markers_of(&self, kind: EventKind) -> impl Iterator<Item = &Marker> {
        self.markers.iter().filter(move |m| m.kind == kind)
    }
}
