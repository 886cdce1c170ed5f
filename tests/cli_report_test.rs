//! Binary-level tests for `covtree report` and `covtree init`.

use assert_cmd::assert::OutputAssertExt;
use indoc::formatdoc;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn covtree(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_covtree"));
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("COVTREE_PROJECT_KEY")
        .env("NO_COLOR", "1");
    cmd
}

/// Four production lines, three of them covered.
fn write_lcov(dir: &Path) {
    let content = formatdoc! {"
        SF:{root}/src/a.rs
        DA:1,1
        DA:2,0
        end_of_record
        SF:{root}/src/b.rs
        DA:1,5
        DA:2,1
        end_of_record
        SF:{root}/src/a_test.rs
        DA:1,0
        end_of_record
        ",
        root = dir.display()
    };
    fs::write(dir.join("lcov.info"), content).unwrap();
}

#[test]
fn test_report_prints_table() {
    let dir = TempDir::new().unwrap();
    write_lcov(dir.path());

    let assert = covtree(dir.path())
        .args(["report", "lcov.info", "--project-key", "demo"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();

    assert!(stdout.contains("demo"), "stdout: {}", stdout);
    assert!(stdout.contains("Project coverage: 75.0%"), "stdout: {}", stdout);
    assert!(!stdout.contains("a_test.rs"));
}

#[test]
fn test_report_json_with_files() {
    let dir = TempDir::new().unwrap();
    write_lcov(dir.path());

    let assert = covtree(dir.path())
        .args(["report", "lcov.info", "--format", "json", "--files"])
        .assert()
        .success();
    let json: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();

    assert_eq!(json["project_key"], "project");
    let rows = json["rows"].as_array().unwrap();
    let keys: Vec<_> = rows.iter().map(|row| row["key"].as_str().unwrap()).collect();
    assert_eq!(
        keys,
        vec![
            "project",
            "project:src",
            "project:src/a.rs",
            "project:src/a_test.rs",
            "project:src/b.rs",
        ]
    );
    assert_eq!(rows[0]["coverage"], 75.0);
    assert_eq!(rows[2]["coverage"], 50.0);
    assert_eq!(rows[3]["component_type"], "file");
    assert_eq!(rows[4]["coverage"], 100.0);
}

#[test]
fn test_below_minimum_exits_with_status_two() {
    let dir = TempDir::new().unwrap();
    write_lcov(dir.path());

    let assert = covtree(dir.path())
        .args(["report", "lcov.info", "--min-coverage", "80"])
        .assert()
        .code(2);
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("(minimum 80.0%: FAILED)"), "stdout: {}", stdout);

    covtree(dir.path())
        .args(["report", "lcov.info", "--min-coverage", "75"])
        .assert()
        .success();
}

#[test]
fn test_config_file_supplies_project_key_and_minimum() {
    let dir = TempDir::new().unwrap();
    write_lcov(dir.path());
    fs::write(
        dir.path().join(".covtree.toml"),
        "project_key = \"acme\"\n\n[report]\nmin_coverage = 90.0\n",
    )
    .unwrap();

    let assert = covtree(dir.path())
        .args(["report", "lcov.info", "--format", "json"])
        .assert()
        .code(2);
    let json: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(json["project_key"], "acme");
}

#[test]
fn test_output_file() {
    let dir = TempDir::new().unwrap();
    write_lcov(dir.path());

    covtree(dir.path())
        .args(["report", "lcov.info", "--output", "report.txt"])
        .assert()
        .success();
    let written = fs::read_to_string(dir.path().join("report.txt")).unwrap();
    assert!(written.contains("Project coverage: 75.0%"));
}

#[test]
fn test_missing_report_fails() {
    let dir = TempDir::new().unwrap();
    let assert = covtree(dir.path())
        .args(["report", "missing.info"])
        .assert()
        .failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("missing.info"), "stderr: {}", stderr);
}

#[test]
fn test_init_then_refuse_overwrite() {
    let dir = TempDir::new().unwrap();

    covtree(dir.path()).arg("init").assert().success();
    let config = fs::read_to_string(dir.path().join(".covtree.toml")).unwrap();
    assert!(config.contains("project_key = \"project\""));

    covtree(dir.path()).arg("init").assert().failure();
    covtree(dir.path()).args(["init", "--force"]).assert().success();
}
