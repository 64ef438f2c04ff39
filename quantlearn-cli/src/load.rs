//! CSV price file → `Frame`.
//!
//! Header names are lower-cased. The date column becomes the index; every
//! other column that parses as f64 becomes a number column. Empty, `NaN`,
//! `null` and `NA` cells are missing values. Columns holding anything else
//! (tickers, free text, a stray `-` in a price column) are skipped, logged
//! at `warn!` and reported back so a later fit can name the bad cell.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use quantlearn_core::{ColumnValues, EstimatorError, Frame, InputError};
use tracing::warn;

/// A column dropped because one of its cells is not a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedColumn {
    pub name: String,
    pub line: usize,
    pub cell: String,
}

/// Loaded price data plus the columns that could not be read as numbers.
#[derive(Debug, Clone)]
pub struct PriceData {
    pub frame: Frame,
    pub skipped: Vec<SkippedColumn>,
}

impl PriceData {
    /// Turn a fit error into a user-facing one. A missing column that was
    /// dropped by the loader is reported with the offending cell.
    pub fn explain_fit_error(&self, err: EstimatorError) -> anyhow::Error {
        if let EstimatorError::InvalidInput(InputError::MissingColumn(name)) = &err {
            if let Some(skipped) = self.skipped.iter().find(|s| s.name == *name) {
                return anyhow!(
                    "column '{}' is not numeric: cell '{}' at line {}",
                    skipped.name,
                    skipped.cell,
                    skipped.line
                );
            }
        }
        err.into()
    }
}

/// Load a CSV price file from disk.
pub fn load_csv(path: &Path, date_column: &str) -> Result<PriceData> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    read_csv(file, date_column).with_context(|| format!("failed to load {}", path.display()))
}

/// Parse CSV from any reader.
pub fn read_csv<R: Read>(reader: R, date_column: &str) -> Result<PriceData> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .context("failed to read CSV header")?
        .iter()
        .map(str::to_lowercase)
        .collect();
    let wanted = date_column.to_lowercase();
    let date_idx = headers
        .iter()
        .position(|h| *h == wanted)
        .ok_or_else(|| anyhow!("missing date column '{date_column}'"))?;

    let mut dates = Vec::new();
    // `None` once a column has shown a non-numeric cell.
    let mut columns: Vec<Option<Vec<f64>>> = vec![Some(Vec::new()); headers.len()];
    let mut skipped = Vec::new();

    for (row, record) in rdr.records().enumerate() {
        // Header is line 1.
        let line = row + 2;
        let record = record.with_context(|| format!("malformed CSV at line {line}"))?;
        for (col, field) in record.iter().enumerate() {
            if col == date_idx {
                let date = parse_date(field)
                    .ok_or_else(|| anyhow!("unparseable date '{field}' at line {line}"))?;
                dates.push(date);
                continue;
            }
            if let Some(values) = &mut columns[col] {
                match parse_value(field) {
                    Some(v) => values.push(v),
                    None => {
                        warn!(
                            column = %headers[col],
                            line,
                            cell = field,
                            "skipping non-numeric column"
                        );
                        skipped.push(SkippedColumn {
                            name: headers[col].clone(),
                            line,
                            cell: field.to_string(),
                        });
                        columns[col] = None;
                    }
                }
            }
        }
    }

    let mut frame = Frame::new(dates).context("date column must be strictly increasing")?;
    for (name, values) in headers.into_iter().zip(columns) {
        if name == wanted {
            continue;
        }
        if let Some(values) = values {
            frame.push_column(name, ColumnValues::Number(values))?;
        }
    }
    Ok(PriceData { frame, skipped })
}

/// `YYYY-MM-DD`, optionally followed by a time (and offset) that is dropped.
fn parse_date(field: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(field, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(field, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_str(field, "%Y-%m-%d %H:%M:%S%:z")
                .ok()
                .map(|dt| dt.date_naive())
        })
}

fn parse_value(field: &str) -> Option<f64> {
    if field.is_empty()
        || field.eq_ignore_ascii_case("nan")
        || field.eq_ignore_ascii_case("null")
        || field.eq_ignore_ascii_case("na")
    {
        return Some(f64::NAN);
    }
    field.parse().ok()
}
