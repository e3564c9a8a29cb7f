//! Workbook reader: .xlsx file → RawSheet

use crate::error::{LensError, LensResult};
use crate::types::{CellValue, RawSheet};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::path::{Path, PathBuf};

/// Reads one named sheet out of an `.xlsx` workbook into a `RawSheet`.
pub struct SheetReader {
    path: PathBuf,
    sheet_name: String,
}

impl SheetReader {
    pub fn new<P: AsRef<Path>>(path: P, sheet_name: &str) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            sheet_name: sheet_name.to_string(),
        }
    }

    /// Open the workbook and convert the configured sheet. An unreadable file
    /// or a missing sheet is a structural error that aborts the upload.
    pub fn read(&self) -> LensResult<RawSheet> {
        let mut workbook: Xlsx<_> = open_workbook(&self.path)
            .map_err(|e| LensError::Excel(format!("Failed to open Excel file: {}", e)))?;

        if !workbook
            .sheet_names()
            .iter()
            .any(|name| name == &self.sheet_name)
        {
            return Err(LensError::SheetNotFound(self.sheet_name.clone()));
        }

        let range = workbook.worksheet_range(&self.sheet_name).map_err(|e| {
            LensError::Excel(format!("Failed to read sheet '{}': {}", self.sheet_name, e))
        })?;

        Ok(convert_range(&range))
    }
}

fn convert_range(range: &Range<Data>) -> RawSheet {
    let rows = range
        .rows()
        .map(|row| row.iter().map(convert_cell).collect())
        .collect();
    RawSheet::new(rows)
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        // Datetime, duration and error cells degrade to their display string;
        // month headers in PCC exports arrive as plain text, not dates.
        other => CellValue::Text(other.to_string()),
    }
}
