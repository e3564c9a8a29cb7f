//! Month column classification and numeric coercion
//!
//! A column is a month column iff its label matches the strict `Mon-YY` form
//! emitted by the source spreadsheet tool ("Jan-24", "Dec-23"). Values in
//! month columns coerce to numeric; blank or non-numeric cells become missing,
//! never zero — zero-filling is a presentation choice, not a typing one.

use crate::error::{LensError, LensResult};
use crate::types::{CellValue, Month, NormalizedTable};
use chrono::NaiveDate;
use regex::Regex;

/// Canonical month-label pattern: three-letter English abbreviation, hyphen,
/// two-digit year. Case-sensitive.
pub const MONTH_PATTERN: &str = r"^(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)-\d{2}$";

pub(crate) fn month_regex() -> LensResult<Regex> {
    Regex::new(MONTH_PATTERN).map_err(|e| LensError::Internal(format!("Regex error: {}", e)))
}

/// Check whether a column label is a month column label.
pub fn is_month_label(label: &str) -> bool {
    month_regex().map(|re| re.is_match(label)).unwrap_or(false)
}

/// Parse a `Mon-YY` label into a `Month` (dated at the first of the month).
/// Returns `None` for anything that is not a canonical month label.
pub fn parse_month(label: &str) -> Option<Month> {
    if !is_month_label(label) {
        return None;
    }
    NaiveDate::parse_from_str(&format!("01-{}", label), "%d-%b-%y")
        .ok()
        .map(|date| Month {
            label: label.to_string(),
            date,
        })
}

/// All month columns of a table, re-sorted chronologically (by parsed date,
/// not lexical column order) for use as the time axis.
pub fn month_columns(table: &NormalizedTable) -> Vec<Month> {
    let mut months: Vec<Month> = table
        .columns
        .iter()
        .filter_map(|label| parse_month(label))
        .collect();
    months.sort_by_key(|m| m.date);
    months
}

/// Coerce a cell to a number. Numeric text parses; blanks, booleans and
/// non-numeric text are missing.
pub fn coerce_numeric(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Number(n) => Some(*n),
        CellValue::Text(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
