//! Receipt conformance: receipts validate against the schema generated from
//! the Rust types, and the render subcommands accept them.

use assert_cmd::Command;
use predicates::prelude::*;
use sarifmatch_types::MatchReceipt;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[allow(deprecated)]
fn sarifmatch_cmd() -> Command {
    Command::cargo_bin("sarifmatch").expect("sarifmatch binary not found - run `cargo build` first")
}

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .join("tests")
        .join("fixtures")
}

fn receipt_validator() -> jsonschema::Validator {
    let schema = serde_json::to_value(schemars::schema_for!(MatchReceipt)).expect("schema json");
    jsonschema::validator_for(&schema).expect("compile receipt schema")
}

fn schema_errors(validator: &jsonschema::Validator, value: &Value) -> Vec<String> {
    validator.iter_errors(value).map(|e| e.to_string()).collect()
}

fn read_json(path: &Path) -> Value {
    let text = std::fs::read_to_string(path).expect("read json");
    serde_json::from_str(&text).expect("parse json")
}

/// Run `local` over a fixture report and return the receipt it wrote.
///
/// The goldens carry placeholder timestamps, so the render subcommands get a
/// receipt straight from a run instead.
fn fresh_receipt(tmp: &TempDir, report_name: &str) -> PathBuf {
    let receipt_path = tmp.path().join("receipt.json");
    sarifmatch_cmd()
        .current_dir(tmp.path())
        .arg("local")
        .arg("--project-dir")
        .arg(fixtures_dir().join("project"))
        .arg(fixtures_dir().join("reports").join(report_name))
        .arg("--report-out")
        .arg(&receipt_path)
        .output()
        .expect("run");
    assert!(receipt_path.is_file(), "no receipt for {report_name}");
    receipt_path
}

#[test]
fn golden_receipts_conform_to_schema() {
    let validator = receipt_validator();
    let dir = fixtures_dir().join("receipts");
    let mut seen = 0;
    for entry in std::fs::read_dir(&dir).expect("read receipts dir") {
        let path = entry.expect("dir entry").path();
        if path.extension().is_none_or(|ext| ext != "json") {
            continue;
        }
        let errors = schema_errors(&validator, &read_json(&path));
        assert!(errors.is_empty(), "{}: {errors:#?}", path.display());
        seen += 1;
    }
    assert!(seen >= 2, "expected receipt fixtures in {}", dir.display());
}

#[test]
fn fresh_receipts_conform_to_schema() {
    let validator = receipt_validator();
    for name in ["matching.sarif.json", "column_out_of_range.sarif.json", "not_json.sarif.json"] {
        let tmp = TempDir::new().expect("temp dir");
        let receipt = read_json(&fresh_receipt(&tmp, name));
        let errors = schema_errors(&validator, &receipt);
        assert!(errors.is_empty(), "{name}: {errors:#?}");
        assert_eq!(receipt["schema"], "sarifmatch.receipt.v1");
    }
}

#[test]
fn findings_paths_are_repo_relative() {
    let receipt = read_json(&fixtures_dir().join("receipts/local_invalid_content.json"));
    for finding in receipt["findings"].as_array().expect("findings") {
        let path = finding["location"]["path"].as_str().unwrap_or_default();
        assert!(!path.starts_with('/'), "{path}");
        assert!(!path.contains('\\'), "{path}");
        assert!(!path.contains(".."), "{path}");
        assert_eq!(finding["fingerprint"].as_str().map(str::len), Some(64));
    }
}

#[test]
fn md_renders_a_receipt() {
    let tmp = TempDir::new().expect("temp dir");
    sarifmatch_cmd()
        .arg("md")
        .arg("--receipt")
        .arg(fresh_receipt(&tmp, "invalid_content_in_location.sarif.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("# Sarifmatch report"))
        .stdout(predicate::str::contains("MISMATCH"))
        .stdout(predicate::str::contains("leading_whitespace"));
}

#[test]
fn md_writes_to_output_file() {
    let tmp = TempDir::new().expect("temp dir");
    let out = tmp.path().join("nested/comment.md");
    sarifmatch_cmd()
        .arg("md")
        .arg("--receipt")
        .arg(fresh_receipt(&tmp, "matching.sarif.json"))
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let md = std::fs::read_to_string(&out).expect("read markdown");
    assert!(md.contains("MATCH"), "{md}");
}

#[test]
fn annotations_render_a_receipt() {
    let tmp = TempDir::new().expect("temp dir");
    sarifmatch_cmd()
        .arg("annotations")
        .arg("--receipt")
        .arg(fresh_receipt(&tmp, "invalid_content_in_location.sarif.json"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "::error file=src/com/ibm/security/appscan/altoromutual/servlet/LoginHttpServlet.java,line=93,col=26::",
        ));
}

#[test]
fn annotations_respect_max() {
    let tmp = TempDir::new().expect("temp dir");
    sarifmatch_cmd()
        .arg("annotations")
        .arg("--receipt")
        .arg(fresh_receipt(&tmp, "invalid_content_in_location.sarif.json"))
        .args(["--max", "0"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn md_rejects_placeholder_timestamps() {
    sarifmatch_cmd()
        .arg("md")
        .arg("--receipt")
        .arg(fixtures_dir().join("receipts/local_matching.json"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("parse sarifmatch receipt"));
}

#[test]
fn md_rejects_non_receipt_json() {
    sarifmatch_cmd()
        .arg("md")
        .arg("--receipt")
        .arg(fixtures_dir().join("reports/matching.sarif.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown receipt schema"));
}

#[test]
fn explain_known_identifiers() {
    for (identifier, title) in [
        ("region.bounds", "Region Bounds"),
        ("leading_whitespace", "Leading Whitespace"),
        ("unsupported_repo_url", "Unsupported Repository URL"),
    ] {
        sarifmatch_cmd()
            .args(["explain", identifier])
            .assert()
            .success()
            .stdout(predicate::str::starts_with(title))
            .stdout(predicate::str::contains("Remediation"));
    }
}

#[test]
fn explain_every_registered_identifier() {
    let ids = sarifmatch_types::explain::all_check_ids()
        .iter()
        .chain(sarifmatch_types::explain::all_codes());
    for identifier in ids {
        sarifmatch_cmd()
            .args(["explain", *identifier])
            .assert()
            .success();
    }
}

#[test]
fn explain_unknown_identifier_exits_1() {
    sarifmatch_cmd()
        .args(["explain", "deps.no_wildcards"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown check_id or code: deps.no_wildcards"))
        .stderr(predicate::str::contains("span.content"));
}
