use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use serde_json::Value;

fn tly(project: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tly"))
        .arg("--project")
        .arg(project)
        .args(args)
        .env("XDG_CONFIG_HOME", project.join("user-config"))
        .env_remove("TALLY_LOG")
        .output()
        .expect("tly should run")
}

fn tly_json(project: &Path, args: &[&str]) -> Value {
    let out = tly(project, args);
    assert!(
        out.status.success(),
        "tly {args:?} failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    serde_json::from_slice(&out.stdout).expect("stdout should be json")
}

#[test]
fn audit_to_schedule_flow() {
    let temp = tempfile::tempdir().expect("tempdir should create");
    let root = temp.path();

    let init = tly_json(root, &["init"]);
    assert_eq!(init["configWritten"], true);
    assert!(root.join(".tally/data").is_dir());

    let entry = tly_json(root, &["schedule", "add", "9098", "--month", "6", "--year", "2025"]);
    assert_eq!(entry["className"], "Tampas");
    assert_eq!(entry["status"], "pending");

    let record = tly_json(
        root,
        &[
            "audit",
            "add",
            "--date",
            "2025-06-10",
            "--location",
            "9098",
            "--entry-type",
            "classe",
            "--item",
            "9098:Tampa:10:9:qm=1",
        ],
    );
    assert!(record["id"].as_str().is_some_and(|id| id.starts_with("aud")));

    let progress = tly_json(root, &["schedule", "refresh", "--month", "6", "--year", "2025"]);
    assert_eq!(progress["completed"], 1);
    assert_eq!(progress["entries"][0]["auditCount"], 1);
    assert_eq!(progress["entries"][0]["lastAuditDate"], "2025-06-10");

    let summary = tly_json(root, &["summary", "--month", "6", "--year", "2025"]);
    assert_eq!(summary["auditedQuantity"], 10);
    assert_eq!(summary["realQuantity"], 9);
    assert_eq!(summary["quantityMismatches"], 1);
    assert_eq!(summary["accuracyPercentage"], 90.0);

    let stored = std::fs::read_to_string(root.join(".tally/data/audits.json"))
        .expect("audits collection should exist");
    assert!(stored.contains("\"classe\""));
}

#[test]
fn empty_audit_is_rejected_with_prefixed_error() {
    let temp = tempfile::tempdir().expect("tempdir should create");
    tly_json(temp.path(), &["init"]);

    let out = tly(temp.path(), &["audit", "add", "--location", "Rua 1"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("tly error:"), "{stderr}");
    assert!(!temp.path().join(".tally/data/audits.json").exists());
}

#[test]
fn delete_of_unknown_audit_is_a_no_op() {
    let temp = tempfile::tempdir().expect("tempdir should create");
    tly_json(temp.path(), &["init"]);

    let deleted = tly_json(temp.path(), &["audit", "delete", "aud-missing"]);
    assert_eq!(deleted["deleted"], false);
}

#[test]
fn schema_needs_no_project() {
    let temp = tempfile::tempdir().expect("tempdir should create");
    let schema = tly_json(temp.path(), &["schema", "schedule"]);
    assert!(schema["properties"]["monthlyTarget"].is_object());
}
