//! Binary-level tests for the firmrank CLI.

mod common;

use assert_cmd::Command;
use common::{fixture_path, sources_dir};
use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::TempDir;

fn firmrank(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("firmrank").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("FIRMRANK_PLATFORM")
        .env_remove("FIRMRANK_RANK_MODE")
        .env_remove("FIRMRANK_EXCLUDE_ENFORCEMENT")
        .env_remove("FIRMRANK_MIN_N")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn rank_json_output() {
    let temp = TempDir::new().unwrap();
    let stdout = stdout_of(
        firmrank(&temp)
            .arg("rank")
            .arg(fixture_path("meta_small.json"))
            .args(["--format", "json"]),
    );

    let json: Value = serde_json::from_str(&stdout).unwrap();
    let entries = json["view"]["ranking"]["entries"].as_array().unwrap();
    let ids: Vec<_> = entries
        .iter()
        .map(|e| e["firm_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["alfa", "beta"]);
    assert_eq!(json["view"]["totals"]["reviews"], 10);
}

#[test]
fn rank_reports_unreachable_min_n() {
    let temp = TempDir::new().unwrap();
    let stdout = stdout_of(
        firmrank(&temp)
            .arg("rank")
            .arg(fixture_path("meta_small.json"))
            .args(["--min-n", "50", "--format", "markdown"]),
    );
    assert!(stdout.contains("No firm has at least 50 ratings under the current filters"));
}

#[test]
fn environment_supplies_filter_defaults() {
    let temp = TempDir::new().unwrap();
    let stdout = stdout_of(
        firmrank(&temp)
            .arg("rank")
            .arg(fixture_path("meta_small.json"))
            .args(["--format", "json"])
            .env("FIRMRANK_MIN_N", "2"),
    );
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["view"]["ranking"]["entries"].as_array().unwrap().len(), 3);
}

#[test]
fn firm_detail_plain_terminal() {
    let temp = TempDir::new().unwrap();
    let stdout = stdout_of(
        firmrank(&temp)
            .args(["firm", "alfa"])
            .arg(fixture_path("meta_small.json"))
            .arg("--plain"),
    );
    assert!(stdout.contains("Alfa Legal"));
    assert!(stdout.contains("Skvělá komunikace a rychlé jednání."));
}

#[test]
fn unknown_firm_fails() {
    let temp = TempDir::new().unwrap();
    let output = firmrank(&temp)
        .args(["firm", "nope"])
        .arg(fixture_path("meta_small.json"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Firm not found: nope"));
}

#[test]
fn missing_snapshot_fails() {
    let temp = TempDir::new().unwrap();
    let output = firmrank(&temp).arg("rank").output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read snapshot"));
}

#[test]
fn build_then_rank() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("public").join("meta.json");

    let stdout = stdout_of(
        firmrank(&temp)
            .arg("build")
            .arg("--data-dir")
            .arg(sources_dir())
            .arg("--out")
            .arg(&out),
    );
    assert!(stdout.contains("firms=2, reviews=5, skipped_inputs=1"));

    // The default snapshot location is public/meta.json under the working directory.
    let stdout = stdout_of(firmrank(&temp).args(["rank", "--format", "json"]));
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["view"]["totals"]["firms"], 2);
}

#[test]
fn init_refuses_second_run_without_force() {
    let temp = TempDir::new().unwrap();
    stdout_of(firmrank(&temp).arg("init"));
    assert!(temp.path().join(".firmrank.toml").exists());

    let output = firmrank(&temp).arg("init").output().unwrap();
    assert!(!output.status.success());

    stdout_of(firmrank(&temp).args(["init", "--force"]));
}

#[test]
fn output_file_is_written() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("report.md");
    stdout_of(
        firmrank(&temp)
            .arg("rank")
            .arg(fixture_path("meta_small.json"))
            .args(["--format", "markdown", "--output"])
            .arg(&target),
    );
    let written = std::fs::read_to_string(target).unwrap();
    assert!(written.starts_with("# Law Firm Reviews"));
}
