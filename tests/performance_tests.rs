//! Aggregate performance classification tests

use pharmalens::core::normalize::normalize;
use pharmalens::core::{FamilyOutcome, PerformanceClassifier, PerformanceStatus};
use pharmalens::types::{CellValue, RawSheet};
use pretty_assertions::assert_eq;

fn txt(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}

fn num(n: f64) -> CellValue {
    CellValue::Number(n)
}

fn member(key: &str, label: &str) -> (String, String) {
    (key.to_string(), label.to_string())
}

/// Four branches of the same service with Average PCM 45, 55, blank, 60.
fn metric_sheet() -> RawSheet {
    RawSheet::new(vec![
        vec![txt("Service"), txt("Jan-24"), txt("Average PCM")],
        vec![txt("P1"), num(1.0), num(45.0)],
        vec![txt("P1"), num(2.0), num(55.0)],
        vec![txt("P1"), num(3.0), txt("")],
        vec![txt("P1"), num(4.0), num(60.0)],
    ])
}

#[test]
fn test_threshold_classification() {
    let table = normalize(&metric_sheet()).unwrap();
    let classifier = PerformanceClassifier::new(&table);
    let members = vec![
        member("P1", "P1 (A)"),
        member("P1_1", "P1 (B)"),
        member("P1_2", "P1 (C)"),
        member("P1_3", "P1 (D)"),
    ];
    let outcome = classifier.classify(&members, "Average PCM", 50.0).unwrap();

    let FamilyOutcome::Classified(entries) = outcome else {
        panic!("expected classified entries");
    };
    // the blank-metric branch contributes no entry
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].value, 45);
    assert_eq!(entries[0].status, PerformanceStatus::Underperforming);
    assert_eq!(entries[1].value, 55);
    assert_eq!(entries[1].status, PerformanceStatus::PerformingWell);
    assert_eq!(entries[2].value, 60);
    assert_eq!(entries[2].status, PerformanceStatus::PerformingWell);
}

#[test]
fn test_entries_keep_member_order_and_labels() {
    let table = normalize(&metric_sheet()).unwrap();
    let classifier = PerformanceClassifier::new(&table);
    let members = vec![member("P1_3", "last first"), member("P1", "first last")];
    let outcome = classifier.classify(&members, "Average PCM", 50.0).unwrap();

    let FamilyOutcome::Classified(entries) = outcome else {
        panic!("expected classified entries");
    };
    assert_eq!(entries[0].label, "last first");
    assert_eq!(entries[1].label, "first last");
}

#[test]
fn test_metric_rounds_to_nearest_integer() {
    let sheet = RawSheet::new(vec![
        vec![txt("Service"), txt("Jan-24"), txt("Average PCM")],
        vec![txt("DMS"), num(1.0), num(19.4)],
        vec![txt("OC"), num(1.0), num(19.6)],
    ]);
    let table = normalize(&sheet).unwrap();
    let classifier = PerformanceClassifier::new(&table);
    let members = vec![member("DMS", "DMS"), member("OC", "OC")];
    let outcome = classifier.classify(&members, "Average PCM", 20.0).unwrap();

    let FamilyOutcome::Classified(entries) = outcome else {
        panic!("expected classified entries");
    };
    // 19.4 rounds down and underperforms; 19.6 rounds to the threshold
    assert_eq!(entries[0].value, 19);
    assert_eq!(entries[0].status, PerformanceStatus::Underperforming);
    assert_eq!(entries[1].value, 20);
    assert_eq!(entries[1].status, PerformanceStatus::PerformingWell);
}

#[test]
fn test_textual_metric_parses_like_the_source_sheet() {
    let sheet = RawSheet::new(vec![
        vec![txt("Service"), txt("Jan-24"), txt("Average PCM")],
        vec![txt("NMS"), num(1.0), txt(" 42.7 ")],
    ]);
    let table = normalize(&sheet).unwrap();
    let classifier = PerformanceClassifier::new(&table);
    let outcome = classifier
        .classify(&[member("NMS", "NMS")], "Average PCM", 50.0)
        .unwrap();

    let FamilyOutcome::Classified(entries) = outcome else {
        panic!("expected classified entries");
    };
    assert_eq!(entries[0].value, 43);
}

#[test]
fn test_no_member_with_metric_reports_no_data() {
    let table = normalize(&metric_sheet()).unwrap();
    let classifier = PerformanceClassifier::new(&table);
    // none of these keys resolve, and P1_2's metric is blank
    let members = vec![member("CPCS", "CPCS"), member("P1_2", "P1 (C)")];
    let outcome = classifier.classify(&members, "Average PCM", 50.0).unwrap();
    assert_eq!(outcome, FamilyOutcome::NoData);
}
