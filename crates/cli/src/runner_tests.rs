#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;

fn outcome() -> CheckOutcome {
    CheckOutcome {
        result: String::new(),
        error_mismatch: false,
        tool_version: "243.0.1".to_string(),
        analyzer_version: None,
        exit_code: Some(0),
        project: None,
        timestamp: 1_724_500_000,
        elapsed_time: "01:30".to_string(),
        actual_files_count: 12,
        expected_files_count: None,
        checked_projects: None,
    }
}

#[test]
fn test_outcome_serialization_skips_absent_fields() {
    let value = serde_json::to_value(outcome()).unwrap();
    assert_eq!(value["tool_version"], "243.0.1");
    assert_eq!(value["actual_files_count"], 12);
    assert_eq!(value["exit_code"], 0);
    assert!(value.get("analyzer_version").is_none());
    assert!(value.get("project").is_none());
    assert!(value.get("expected_files_count").is_none());
}

#[test]
fn test_outcome_records_analyzer_version_when_configured() {
    let mut outcome = outcome();
    outcome.analyzer_version = Some("2024.3".to_string());
    let value = serde_json::to_value(outcome).unwrap();
    assert_eq!(value["analyzer_version"], "2024.3");
}

#[test]
fn test_outcome_keeps_signal_death_distinct_from_zero_exit() {
    let mut outcome = outcome();
    outcome.exit_code = None;
    let value = serde_json::to_value(outcome).unwrap();
    assert_eq!(value["exit_code"], serde_json::Value::Null);
}

#[test]
fn test_outcome_serialization_keeps_present_fields() {
    let mut outcome = outcome();
    outcome.expected_files_count = Some(12);
    outcome.project = Some(RepoInfo {
        url: "https://example.com/zlib.git".to_string(),
        reference: "abc123".to_string(),
        message: "initial".to_string(),
        timestamp: 1_700_000_000,
    });

    let value = serde_json::to_value(outcome).unwrap();
    assert_eq!(value["expected_files_count"], 12);
    assert_eq!(value["project"]["ref"], "abc123");
}

#[tokio::test]
async fn test_write_report_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/out/report.json");

    let mut report = serde_json::Map::new();
    report.insert("zlib".to_string(), serde_json::to_value(outcome()).unwrap());
    write_report(&path, &report).await.unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written["zlib"]["tool_version"], "243.0.1");
}

#[tokio::test]
async fn test_write_report_empty_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    write_report(&path, &serde_json::Map::new()).await.unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
}
