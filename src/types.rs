use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

//==============================================================================
// Cell & Sheet Types
//==============================================================================

/// A single spreadsheet cell, decoupled from the reader crate.
///
/// Missing cells are an explicit `Empty`, never absent: downstream code can
/// always ask a row for a column and get a value back.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// String form of the cell as the source spreadsheet tool would show it.
    /// Whole numbers print without a trailing `.0` so that keys and labels
    /// typed as numbers still match their text counterparts.
    pub fn to_display_string(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(f) => {
                if f.fract() == 0.0 && f.is_finite() {
                    format!("{}", *f as i64)
                } else {
                    f.to_string()
                }
            }
            CellValue::Bool(b) => b.to_string(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}

/// An untyped grid of cells as read from the workbook, no reliable header.
/// Immutable once loaded; every other entity derives from it.
#[derive(Debug, Clone, Default)]
pub struct RawSheet {
    rows: Vec<Vec<CellValue>>,
}

impl RawSheet {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

//==============================================================================
// Normalized Table
//==============================================================================

/// One service row: a unique (post-disambiguation) key plus its cells keyed
/// by column label.
#[derive(Debug, Clone)]
pub struct ServiceRow {
    /// Unique row key, branch-suffixed where the raw sheet repeated a name
    /// (`NMS`, `NMS_1`, ...). Original case is preserved.
    pub key: String,
    /// The raw first-column value before disambiguation.
    pub base: String,
    /// Cells keyed by column label; absent labels read as `Empty`.
    pub cells: HashMap<String, CellValue>,
}

const EMPTY_CELL: CellValue = CellValue::Empty;

impl ServiceRow {
    pub fn cell(&self, column: &str) -> &CellValue {
        self.cells.get(column).unwrap_or(&EMPTY_CELL)
    }
}

/// The cleaned-up sheet body: trimmed column labels (fully-empty columns
/// removed), rows keyed by a unique service key. Derived once per upload and
/// read-only thereafter.
#[derive(Debug, Clone, Default)]
pub struct NormalizedTable {
    /// Label of the first kept column, which holds the service keys.
    pub service_column: String,
    /// All kept column labels in sheet order (the service column is first).
    pub columns: Vec<String>,
    pub rows: Vec<ServiceRow>,
}

impl NormalizedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Disambiguated service keys in row order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.key.as_str())
    }
}

//==============================================================================
// Time Axis & Observations
//==============================================================================

/// A calendar-month column: the `Mon-YY` label as it appears in the sheet
/// plus its parsed date (first of month), used for chronological ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Month {
    pub label: String,
    pub date: NaiveDate,
}

/// One melted (service, month, value) data point. `value` is `None` when the
/// cell was blank or non-numeric; the core never substitutes zero, so the
/// rendering side decides between a gap and a zero-filled line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    /// Display label for the series (branch suffix stripped, title case).
    pub service: String,
    pub month: Month,
    pub value: Option<f64>,
}

impl Observation {
    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }
}
