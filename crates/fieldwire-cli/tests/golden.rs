use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use fieldwire_core::DecodeReport;
use serde_json::Value;

fn repo_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

fn load_expected_report(dir: &str) -> DecodeReport {
    let expected_path = repo_root().join(dir).join("expected_report.json");
    let expected_json = fs::read_to_string(&expected_path).expect("read expected_report.json");
    serde_json::from_str(&expected_json).expect("parse expected report")
}

fn run_golden(dir: &str, layout: &str) {
    let input = repo_root().join(dir).join("input.bin");
    let expected = load_expected_report(dir);

    let output = Command::new(assert_cmd::cargo::cargo_bin!("fieldwire"))
        .arg("decode")
        .arg(layout)
        .arg(&input)
        .arg("--stdout")
        .output()
        .expect("run fieldwire");
    assert!(output.status.success(), "decode failed for {dir}");

    let mut actual: DecodeReport =
        serde_json::from_slice(&output.stdout).expect("parse actual report");
    actual.input.path = expected.input.path.clone();
    actual.tool.version = expected.tool.version.clone();

    let actual_value: Value = serde_json::to_value(actual).expect("serialize actual");
    let expected_value: Value = serde_json::to_value(expected).expect("serialize expected");

    assert_eq!(actual_value, expected_value, "golden mismatch in {dir}");
}

// Fixtures store native-order fields as little-endian bytes.
#[cfg(target_endian = "little")]
#[test]
fn golden_roster() {
    run_golden("tests/golden/roster", "roster");
}

#[test]
fn golden_records() {
    run_golden("tests/golden/records", "records");
}
