//! CLI behaviour: runs the built binary against temporary files.

mod common;

use common::{deployment_records, write_json};
use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_temporal-kg"))
        .args(args)
        .output()
        .expect("failed to run temporal-kg")
}

#[test]
fn ingest_prints_ranked_summary() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_json(dir.path(), "events.json", &deployment_records());

    let out = run(&["ingest", path.to_str().unwrap()]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8_lossy(&out.stdout);
    let first_row = stdout.lines().nth(2).unwrap();
    assert!(first_row.starts_with("atlas -[service.deployed]-> payments"));
    assert!(first_row.contains("2.0"));
    assert!(first_row.contains("2024-01-01 → 2024-01-02"));
}

#[test]
fn ingest_with_export_writes_graph_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_json(dir.path(), "events.json", &deployment_records());
    let export = dir.path().join("graph.graphml");

    let out = run(&["ingest", path.to_str().unwrap(), "--export", export.to_str().unwrap()]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(std::fs::read_to_string(&export).unwrap().contains("<graphml"));
}

#[test]
fn explicit_format_overrides_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_json(dir.path(), "events.json", &deployment_records());
    let export = dir.path().join("graph.out");

    let out = run(&[
        "ingest",
        path.to_str().unwrap(),
        "--export",
        export.to_str().unwrap(),
        "--format",
        "json",
    ]);
    assert!(out.status.success());
    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&export).unwrap()).unwrap();
    assert_eq!(doc["links"].as_array().unwrap().len(), 2);
}

#[test]
fn ingest_of_malformed_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_json(dir.path(), "events.json", &serde_json::json!([{"event_type": "t"}]));

    let out = run(&["ingest", path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("missing required field"));
}

#[test]
fn fabricate_then_ingest() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("synthetic.json");

    let out = run(&[
        "fabricate",
        "--count",
        "30",
        "--seed",
        "5",
        "--output",
        output.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let records: Vec<serde_json::Value> =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(records.len(), 30);

    let out = run(&["ingest", output.to_str().unwrap(), "--top-k", "3"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    // header, rule, three rows
    assert_eq!(stdout.lines().count(), 5);
}

#[test]
fn zero_top_k_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_json(dir.path(), "events.json", &deployment_records());
    let out = run(&["ingest", path.to_str().unwrap(), "--top-k", "0"]);
    assert!(!out.status.success());
}

#[test]
fn zero_fabricate_count_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("synthetic.json");
    let out = run(&["fabricate", "--count", "0", "--output", output.to_str().unwrap()]);
    assert!(!out.status.success());
    assert!(!output.exists());
}
