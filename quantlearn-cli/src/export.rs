//! Artifact export: derived series as CSV, plot descriptions as JSON.
//!
//! For each fitted estimator three files land in the output directory:
//! - `<label>.transform.csv`: date plus every transform column
//! - `<label>.predict.csv`: date plus every predict column
//! - `<label>.plot.json`: the renderer-agnostic plot description
//!
//! Missing values are empty CSV cells and `null` in JSON.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use quantlearn_core::{AnyEstimator, ColumnValues, EventKind, Frame, PlotOptions, PlotSpec};

/// What one estimator produced, for the run summary.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub label: String,
    pub kind: &'static str,
    /// Last non-missing value of the first transform column.
    pub last_value: Option<f64>,
    pub buys: usize,
    pub sells: usize,
    pub files: Vec<PathBuf>,
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let last = match self.last_value {
            Some(v) => format!("{v:.2}"),
            None => "n/a".to_string(),
        };
        write!(
            f,
            "{:<24} {:<24} last={:<10} buys={:<4} sells={}",
            self.label, self.kind, last, self.buys, self.sells
        )
    }
}

/// Serialize a frame as CSV: `date` first, then columns in order.
pub fn export_frame_csv(frame: &Frame) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec!["date".to_string()];
    header.extend(frame.column_names().map(str::to_string));
    wtr.write_record(&header)?;

    for (i, date) in frame.index().iter().enumerate() {
        let mut record = Vec::with_capacity(header.len());
        record.push(date.to_string());
        for column in frame.columns() {
            record.push(cell(&column.values, i));
        }
        wtr.write_record(&record)?;
    }

    let bytes = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

fn cell(values: &ColumnValues, i: usize) -> String {
    match values {
        ColumnValues::Number(v) if v[i].is_nan() => String::new(),
        ColumnValues::Number(v) => format!("{:.6}", v[i]),
        ColumnValues::Flag(v) => v[i].map(|b| b.to_string()).unwrap_or_default(),
        ColumnValues::Signal(v) => v[i].map(|s| s.to_string()).unwrap_or_default(),
    }
}

/// Serialize a plot description to pretty JSON.
pub fn export_plot_json(plot: &PlotSpec) -> Result<String> {
    serde_json::to_string_pretty(plot).context("failed to serialize plot description to JSON")
}

/// Write all artifacts of a fitted estimator under `output_dir/<label>.*`.
pub fn save_artifacts(
    estimator: &AnyEstimator,
    frame: &Frame,
    label: &str,
    output_dir: &Path,
) -> Result<Summary> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output dir: {}", output_dir.display()))?;

    let transformed = estimator.transform(frame)?;
    let predicted = estimator.predict(frame)?;
    let plot = estimator.plot(&PlotOptions::default())?;

    let outputs = [
        (format!("{label}.transform.csv"), export_frame_csv(&transformed)?),
        (format!("{label}.predict.csv"), export_frame_csv(&predicted)?),
        (format!("{label}.plot.json"), export_plot_json(&plot)?),
    ];
    let mut files = Vec::with_capacity(outputs.len());
    for (name, contents) in outputs {
        let path = output_dir.join(name);
        std::fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        files.push(path);
    }

    let last_value = transformed
        .columns()
        .first()
        .and_then(|column| match &column.values {
            ColumnValues::Number(v) => v.iter().rev().copied().find(|x| !x.is_nan()),
            _ => None,
        });

    Ok(Summary {
        label: label.to_string(),
        kind: estimator.kind(),
        last_value,
        buys: plot.markers_of(EventKind::Buy).count(),
        sells: plot.markers_of(EventKind::Sell).count(),
        files,
    })
}

/// File stems for a batch of estimator labels. Repeated labels get a
/// `_<n>` suffix so artifacts never overwrite each other.
pub fn unique_labels(labels: &[String]) -> Vec<String> {
    let mut totals: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        *totals.entry(label.as_str()).or_default() += 1;
    }
    let mut seen: HashMap<&str, usize> = HashMap::new();
    labels
        .iter()
        .map(|label| {
            if totals[label.as_str()] == 1 {
                return label.clone();
            }
            let n = seen.entry(label.as_str()).or_default();
            *n += 1;
            format!("{label}_{n}")
        })
        .collect()
}
