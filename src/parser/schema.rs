//! Normalized profile table and its column schema.
//!
//! Every parser produces a [`ProfileTable`]; the comparator and the
//! writers consume it. Cells are typed and may be missing (a comparison
//! leaves the absent side empty, short text lines leave trailing cells empty).

use crate::utils::config::{
    CPU_COLUMN_MARKER, DURATION_COLUMNS, INTEGER_COLUMNS, NAME_COLUMN, PERCENT_COLUMNS,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single typed cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// Numeric view of the cell (text cells have none)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(v) => Some(*v as f64),
            CellValue::Float(v) => Some(*v),
            CellValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The zero value of the same numeric type (used when filling gaps)
    pub fn zero_like(&self) -> CellValue {
        match self {
            CellValue::Int(_) => CellValue::Int(0),
            _ => CellValue::Float(0.0),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int(v) => write!(f, "{}", v),
            // Keep a decimal digit so floats stay recognisable as floats
            CellValue::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{:.1}", v),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

/// How the raw text of a column is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Call counts
    Integer,
    /// `"12.34%"` → 12.34
    Percent,
    /// `"1.5ms"` → milliseconds
    Duration,
    /// Kept verbatim
    Text,
}

impl ColumnKind {
    /// Look up the kind of a column by its name
    pub fn for_column(name: &str) -> Self {
        if INTEGER_COLUMNS.contains(&name) {
            ColumnKind::Integer
        } else if PERCENT_COLUMNS.contains(&name) {
            ColumnKind::Percent
        } else if DURATION_COLUMNS.contains(&name) {
            ColumnKind::Duration
        } else {
            ColumnKind::Text
        }
    }
}

/// Whether a column belongs to the CPU side of the report
pub fn is_cpu_column(name: &str) -> bool {
    name.contains(CPU_COLUMN_MARKER)
}

/// One table row; cells are aligned with the table's columns
pub type Row = Vec<Option<CellValue>>;

/// The canonical in-memory representation of a profiler report
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfileTable {
    /// Column names in display order
    pub columns: Vec<String>,

    /// Rows, each aligned with `columns` (`None` = missing)
    pub rows: Vec<Row>,

    /// `CPU total`/`CUDA total` hold self time rather than inclusive time.
    /// Set for tables aggregated from raw trace events.
    #[serde(default)]
    pub totals_are_self_time: bool,
}

impl ProfileTable {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            totals_are_self_time: false,
        }
    }

    /// Append a row, padding or truncating it to the column count
    pub fn push_row(&mut self, mut row: Row) {
        row.resize(self.columns.len(), None);
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at `row` in the named column
    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.get(col)?.as_ref()
    }

    /// Values of the `Name` column, in row order (`None` for missing names)
    pub fn names(&self) -> Vec<Option<&str>> {
        match self.column_index(NAME_COLUMN) {
            Some(col) => self
                .rows
                .iter()
                .map(|row| row[col].as_ref().and_then(CellValue::as_str))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Find the row holding `name` in the `Name` column
    pub fn find_row(&self, name: &str) -> Option<usize> {
        self.names().iter().position(|n| *n == Some(name))
    }

    /// Keep only the columns accepted by `keep`
    pub fn retain_columns(&mut self, mut keep: impl FnMut(&str) -> bool) {
        let kept: Vec<usize> = (0..self.columns.len())
            .filter(|&i| keep(&self.columns[i]))
            .collect();

        let columns: Vec<String> = kept.iter().map(|&i| self.columns[i].clone()).collect();
        self.columns = columns;
        for row in &mut self.rows {
            let narrowed: Row = kept.iter().map(|&i| row[i].take()).collect();
            *row = narrowed;
        }
    }

    /// Sort rows by the `Name` column (ordinal order, missing names first)
    pub fn sort_by_name(&mut self) {
        if let Some(col) = self.column_index(NAME_COLUMN) {
            self.rows.sort_by(|a, b| {
                let a = a[col].as_ref().and_then(CellValue::as_str);
                let b = b[col].as_ref().and_then(CellValue::as_str);
                a.cmp(&b)
            });
        }
    }
}
