//! Header location tests

use pharmalens::core::locate_header_row;
use pharmalens::error::LensError;
use pharmalens::types::{CellValue, RawSheet};

fn txt(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}

fn num(n: f64) -> CellValue {
    CellValue::Number(n)
}

#[test]
fn test_header_found_below_title_rows() {
    let sheet = RawSheet::new(vec![
        vec![txt("Pharmacy Service Performance")],
        vec![CellValue::Empty],
        vec![txt("Exported 01/02/2024")],
        vec![txt("Service"), txt("Jan-24"), txt("Feb-24"), txt("Average PCM")],
        vec![txt("NMS"), num(10.0), num(20.0), num(15.0)],
    ]);
    assert_eq!(locate_header_row(&sheet).unwrap(), 3);
}

#[test]
fn test_header_at_first_row() {
    let sheet = RawSheet::new(vec![
        vec![txt("Service"), txt("Dec-23")],
        vec![txt("NMS"), num(4.0)],
    ]);
    assert_eq!(locate_header_row(&sheet).unwrap(), 0);
}

#[test]
fn test_first_of_several_month_rows_wins() {
    let sheet = RawSheet::new(vec![
        vec![txt("Quarter"), txt("Mar-24")],
        vec![txt("Service"), txt("Jan-24")],
    ]);
    assert_eq!(locate_header_row(&sheet).unwrap(), 0);
}

#[test]
fn test_month_token_matched_after_trimming() {
    let sheet = RawSheet::new(vec![vec![txt("Service"), txt("  Jan-24  ")]]);
    assert_eq!(locate_header_row(&sheet).unwrap(), 0);
}

#[test]
fn test_no_month_token_anywhere_fails() {
    let sheet = RawSheet::new(vec![
        vec![txt("Service"), txt("January-24"), txt("Jan24"), txt("Jan-2024")],
        vec![txt("NMS"), num(1.0), num(2.0), num(3.0)],
    ]);
    assert!(matches!(
        locate_header_row(&sheet),
        Err(LensError::HeaderNotFound)
    ));
}

#[test]
fn test_empty_sheet_fails() {
    let sheet = RawSheet::new(vec![]);
    assert!(matches!(
        locate_header_row(&sheet),
        Err(LensError::HeaderNotFound)
    ));
}

#[test]
fn test_numeric_cells_are_not_month_tokens() {
    // A numeric cell whose display form is "45" must not satisfy the header
    // scan, and a date-like number doesn't either.
    let sheet = RawSheet::new(vec![vec![num(45.0), num(2024.0)]]);
    assert!(locate_header_row(&sheet).is_err());
}
