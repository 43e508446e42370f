//! CLI integration tests against a temporary document.

mod common;

use serde_json::{Value, json};
use tempfile::TempDir;

use common::{bruce, clark, run_cli, run_cli_success, seed};

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    let stdout = run_cli_success(&["--help"], &dir.path().join("db.json"));
    for command in ["serve", "init", "list", "get", "stamp", "report"] {
        assert!(stdout.contains(command), "missing {}", command);
    }
}

#[test]
fn test_init_creates_empty_document_once() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("db.json");

    run_cli_success(&["init"], &data);
    let document: Value = serde_json::from_str(&std::fs::read_to_string(&data).unwrap()).unwrap();
    assert_eq!(document, json!({"personajes_dc": []}));

    seed(&data, json!([bruce()]));
    run_cli_success(&["init"], &data);
    let document: Value = serde_json::from_str(&std::fs::read_to_string(&data).unwrap()).unwrap();
    assert_eq!(document["personajes_dc"].as_array().unwrap().len(), 1);
}

#[test]
fn test_list_prints_json_lines() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("db.json");
    seed(&data, json!([bruce(), clark()]));

    let stdout = run_cli_success(&["list"], &data);
    let names: Vec<String> = stdout
        .lines()
        .map(|line| serde_json::from_str::<Value>(line).unwrap()["nombre"].to_string())
        .collect();
    assert_eq!(names, vec!["\"Bruce Wayne\"", "\"Clark Kent\""]);
}

#[test]
fn test_list_filters_by_city() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("db.json");
    seed(&data, json!([bruce(), clark()]));

    let stdout = run_cli_success(&["list", "--ciudad", "METROPOLIS", "--pretty"], &data);
    let records: Value = serde_json::from_str(&stdout).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["nombre"], "Clark Kent");
}

#[test]
fn test_get_record() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("db.json");
    seed(&data, json!([bruce(), clark()]));

    let stdout = run_cli_success(&["get", "2"], &data);
    let record: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(record, clark());
}

#[test]
fn test_get_missing_record_fails() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("db.json");
    seed(&data, json!([bruce()]));

    let output = run_cli(&["get", "9"], &data);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}

#[test]
fn test_missing_document_fails() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&["list"], &dir.path().join("absent.json"));
    assert!(!output.status.success());
}

#[test]
fn test_stamp_only_unstamped_records() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("db.json");
    seed(&data, json!([bruce(), clark()]));

    let stdout = run_cli_success(&["stamp"], &data);
    assert!(stdout.contains("Stamped 1 record(s)"));

    let document: Value = serde_json::from_str(&std::fs::read_to_string(&data).unwrap()).unwrap();
    assert!(document["personajes_dc"][0]["updated_at"].is_string());
    assert_eq!(document["personajes_dc"][1]["updated_at"], "2024-05-03 10:00");

    let stdout = run_cli_success(&["stamp"], &data);
    assert!(stdout.contains("Stamped 0 record(s)"));
}

#[test]
fn test_report_writes_pdf() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("db.json");
    let out = dir.path().join("comics.pdf");
    seed(&data, json!([bruce(), clark()]));

    run_cli_success(&["report", "--out", out.to_str().unwrap()], &data);

    let bytes = std::fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(bytes.ends_with(b"%%EOF\n"));
}

#[test]
fn test_custom_collection_key() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("db.json");

    run_cli_success(&["init", "--collection-key", "heroes"], &data);
    let document: Value = serde_json::from_str(&std::fs::read_to_string(&data).unwrap()).unwrap();
    assert_eq!(document, json!({"heroes": []}));
}
