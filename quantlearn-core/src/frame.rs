//! Frame: a date index plus named, index-aligned columns.
//!
//! Used both for input price data and for every derived output. Missing
//! values are `f64::NAN` in numeric columns and `None` in flag/signal columns.
//! The frame never mutates a column after insertion.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::InputError;

/// Values of a single column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum ColumnValues {
    /// Numeric series; `NaN` marks a missing value.
    Number(Vec<f64>),
    /// Boolean series (e.g. overbought flags).
    Flag(Vec<Option<bool>>),
    /// Small integer series (e.g. a 0/1 position signal).
    Signal(Vec<Option<i8>>),
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Number(v) => v.len(),
            ColumnValues::Flag(v) => v.len(),
            ColumnValues::Signal(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether position `i` holds the missing-value sentinel.
    pub fn is_missing(&self, i: usize) -> bool {
        match self {
            ColumnValues::Number(v) => v.get(i).map_or(true, |x| x.is_nan()),
            ColumnValues::Flag(v) => v.get(i).map_or(true, Option::is_none),
            ColumnValues::Signal(v) => v.get(i).map_or(true, Option::is_none),
        }
    }

    /// Exact equality that treats two missing numeric values as equal.
    pub fn equivalent(&self, other: &ColumnValues) -> bool {
        match (self, other) {
            (ColumnValues::Number(a), ColumnValues::Number(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .zip(b)
                        .all(|(x, y)| (x.is_nan() && y.is_nan()) || x == y)
            }
            _ => self == other,
        }
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
}

/// Ordered, date-indexed collection of columns.
///
/// Invariants enforced at construction:
/// - the index is strictly increasing
/// - every column has exactly `index.len()` entries
/// - column names are unique
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    index: Vec<NaiveDate>,
    columns: Vec<Column>,
}

impl Frame {
    /// Create an empty-column frame over `index`.
    pub fn new(index: Vec<NaiveDate>) -> Result<Self, InputError> {
        if let Some(position) = index.windows(2).position(|w| w[0] >= w[1]) {
            return Err(InputError::UnorderedIndex {
                position: position + 1,
            });
        }
        Ok(Self {
            index,
            columns: Vec::new(),
        })
    }

    /// Build a single numeric column frame.
    pub fn from_series(
        name: impl Into<String>,
        index: Vec<NaiveDate>,
        values: Vec<f64>,
    ) -> Result<Self, InputError> {
        Self::new(index)?.with_column(name, ColumnValues::Number(values))
    }

    /// Builder-style column insertion.
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        values: ColumnValues,
    ) -> Result<Self, InputError> {
        self.push_column(name, values)?;
        Ok(self)
    }

    /// Append a column, checking length and name uniqueness.
    pub fn push_column(
        &mut self,
        name: impl Into<String>,
        values: ColumnValues,
    ) -> Result<(), InputError> {
        let name = name.into();
        if values.len() != self.index.len() {
            return Err(InputError::LengthMismatch {
                column: name,
                expected: self.index.len(),
                actual: values.len(),
            });
        }
        if self.column(&name).is_some() {
            return Err(InputError::DuplicateColumn(name));
        }
        self.columns.push(Column { name, values });
        Ok(())
    }

    pub fn index(&self) -> &[NaiveDate] {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Numeric column lookup. This is the structural check every `fit` runs.
    pub fn numbers(&self, name: &str) -> Result<&[f64], InputError> {
        match self.column(name).map(|c| &c.values) {
            Some(ColumnValues::Number(v)) => Ok(v),
            Some(_) => Err(InputError::NotNumeric(name.to_string())),
            None => Err(InputError::MissingColumn(name.to_string())),
        }
    }

    pub fn flags(&self, name: &str) -> Option<&[Option<bool>]> {
        match self.column(name).map(|c| &c.values) {
            Some(ColumnValues::Flag(v)) => Some(v),
            _ => None,
        }
    }

    pub fn signals(&self, name: &str) -> Option<&[Option<i8>]> {
        match self.column(name).map(|c| &c.values) {
            Some(ColumnValues::Signal(v)) => Some(v),
            _ => None,
        }
    }

    /// Same index, same column names in the same order, and equivalent values.
    pub fn equivalent(&self, other: &Frame) -> bool {
        self.index == other.index
            && self.columns.len() == other.columns.len()
            && self
                .columns
                .iter()
                .zip(&other.columns)
                .all(|(a, b)| a.name == b.name && a.values.equivalent(&b.values))
    }
}
