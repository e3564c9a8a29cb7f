//! CLI integration tests driving the compiled binary

use assert_cmd::Command;
use predicates::prelude::*;
use rust_xlsxwriter::Workbook;
use std::path::Path;
use tempfile::TempDir;

fn write_fixture(path: &Path) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Table 1").unwrap();

    sheet.write_string(0, 0, "Pharmacy Service Performance").unwrap();

    sheet.write_string(2, 0, "JASMI LIMITED FRT03").unwrap();
    sheet.write_string(2, 1, "Jan-24").unwrap();
    sheet.write_string(2, 2, "Feb-24").unwrap();
    sheet.write_string(2, 3, "Average PCM").unwrap();

    sheet.write_string(3, 0, "DMS").unwrap();
    sheet.write_number(3, 1, 12.0).unwrap();
    sheet.write_number(3, 2, 18.0).unwrap();
    sheet.write_number(3, 3, 15.0).unwrap();

    sheet.write_string(4, 0, "DMS").unwrap();
    sheet.write_number(4, 1, 40.0).unwrap();
    sheet.write_number(4, 2, 44.0).unwrap();
    sheet.write_number(4, 3, 42.0).unwrap();

    workbook.save(path).unwrap();
}

fn pharmalens() -> Command {
    Command::cargo_bin("pharmalens").unwrap()
}

#[test]
fn test_validate_reports_structure() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("pcc.xlsx");
    write_fixture(&path);

    pharmalens()
        .arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Service rows: 2"))
        .stdout(predicate::str::contains("Month columns: 2"))
        .stdout(predicate::str::contains("Branch-suffixed keys: 1"));
}

#[test]
fn test_analyze_classifies_dms_family() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("pcc.xlsx");
    write_fixture(&path);

    pharmalens()
        .arg("analyze")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Underperforming (PCM = 15)"))
        .stdout(predicate::str::contains("Performing Well (PCM = 42)"));
}

#[test]
fn test_analyze_json_emits_record_set() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("pcc.xlsx");
    write_fixture(&path);

    let output = pharmalens()
        .arg("analyze")
        .arg(&path)
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["service_count"], 2);
    assert_eq!(report["months"][0]["label"], "Jan-24");
    assert_eq!(report["branches"].as_array().unwrap().len(), 4);
}

#[test]
fn test_trends_prints_branch_observations() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("pcc.xlsx");
    write_fixture(&path);

    pharmalens()
        .arg("trends")
        .arg(&path)
        .arg("--branch")
        .arg("JASMI LIMITED FRT03")
        .assert()
        .success()
        .stdout(predicate::str::contains("Jan-24"))
        .stdout(predicate::str::contains("Dms"));
}

#[test]
fn test_trends_unknown_branch_fails_with_listing() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("pcc.xlsx");
    write_fixture(&path);

    pharmalens()
        .arg("trends")
        .arg(&path)
        .arg("--branch")
        .arg("NOWHERE")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found in config"));
}

#[test]
fn test_compare_family() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("pcc.xlsx");
    write_fixture(&path);

    pharmalens()
        .arg("compare")
        .arg(&path)
        .arg("--family")
        .arg("DMS")
        .assert()
        .success()
        .stdout(predicate::str::contains("DMS (JASMI LIMITED FRT03)"));
}

#[test]
fn test_missing_sheet_aborts_whole_run() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("wrong.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Summary").unwrap();
    sheet.write_string(0, 0, "Jan-24").unwrap();
    workbook.save(&path).unwrap();

    pharmalens()
        .arg("analyze")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Table 1"));
}

#[test]
fn test_nonexistent_file_fails() {
    pharmalens()
        .arg("analyze")
        .arg("no_such_file.xlsx")
        .assert()
        .failure();
}

#[test]
fn test_analyze_with_custom_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("pcc.xlsx");
    write_fixture(&path);

    let config_path = temp_dir.path().join("dashboard.yaml");
    let yaml = r#"
sheet_name: "Table 1"
branches:
  - name: "HIGH STREET"
    services: ["DMS", "DMS_1"]
families:
  - name: "DMS"
    threshold: 20
    members:
      - key: "DMS"
        branch: "HIGH STREET"
      - key: "DMS_1"
        branch: "HIGH STREET"
"#;
    std::fs::write(&config_path, yaml).unwrap();

    pharmalens()
        .arg("analyze")
        .arg(&path)
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("HIGH STREET"))
        .stdout(predicate::str::contains("DMS (HIGH STREET)"));
}
