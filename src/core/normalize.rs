//! Table normalization and service-key disambiguation
//!
//! Takes the raw grid below the located header and produces the one table the
//! rest of the pipeline works from: trimmed column labels, fully-empty columns
//! dropped, missing cells explicit, and duplicate first-column service names
//! rewritten with a branch suffix so every row is uniquely addressable.

use crate::core::header::locate_header_row;
use crate::error::{LensError, LensResult};
use crate::types::{CellValue, NormalizedTable, RawSheet, ServiceRow};
use regex::Regex;
use std::collections::HashMap;

/// Build a `NormalizedTable` from a raw sheet: locate the header, discard
/// everything above it, trim labels, drop columns with no data, and
/// disambiguate duplicate service keys.
pub fn normalize(sheet: &RawSheet) -> LensResult<NormalizedTable> {
    let header_idx = locate_header_row(sheet)?;
    let header = &sheet.rows()[header_idx];
    let body = &sheet.rows()[header_idx + 1..];

    let width = body
        .iter()
        .map(|row| row.len())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0);

    // Keep only columns that hold at least one non-empty body cell.
    let kept: Vec<usize> = (0..width)
        .filter(|&col| {
            body.iter()
                .any(|row| row.get(col).map(|c| !c.is_empty()).unwrap_or(false))
        })
        .collect();

    let columns: Vec<String> = kept
        .iter()
        .map(|&col| {
            header
                .get(col)
                .map(|c| c.to_display_string().trim().to_string())
                .unwrap_or_default()
        })
        .collect();

    let service_column = columns.first().cloned().unwrap_or_default();

    // Raw first-column values, original case and spacing preserved.
    let raw_keys: Vec<String> = body
        .iter()
        .map(|row| {
            kept.first()
                .and_then(|&col| row.get(col))
                .map(|c| c.to_display_string())
                .unwrap_or_default()
        })
        .collect();

    let keys = disambiguate_keys(&raw_keys);

    let rows = body
        .iter()
        .zip(keys)
        .zip(raw_keys)
        .map(|((row, key), base)| {
            let mut cells = HashMap::new();
            for (label, &col) in columns.iter().zip(&kept).skip(1) {
                let value = row.get(col).cloned().unwrap_or(CellValue::Empty);
                cells.insert(label.clone(), value);
            }
            ServiceRow { key, base, cells }
        })
        .collect();

    Ok(NormalizedTable {
        service_column,
        columns,
        rows,
    })
}

/// Rewrite duplicate keys with an occurrence suffix, in order of first
/// appearance: the first occurrence keeps its original form, appearance #2
/// becomes `BASE_1`, appearance #3 `BASE_2`, and so on. Deterministic and
/// idempotent on already-unique inputs.
///
/// Keys that already end in `_<digits>` are not escaped; source service names
/// never legitimately do.
pub fn disambiguate_keys(keys: &[String]) -> Vec<String> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    keys.iter()
        .map(|key| {
            let count = seen.entry(key.as_str()).or_insert(0);
            let out = if *count == 0 {
                key.clone()
            } else {
                format!("{}_{}", key, count)
            };
            *count += 1;
            out
        })
        .collect()
}

/// Strip a trailing `_<digits>` branch suffix, recovering the base service
/// name. Lossy: the branch identity is gone after this.
pub fn strip_branch_suffix(key: &str) -> LensResult<String> {
    let re = Regex::new(r"_\d+$").map_err(|e| LensError::Internal(format!("Regex error: {}", e)))?;
    Ok(re.replace(key, "").into_owned())
}
