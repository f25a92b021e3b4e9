//! End-to-end tests for the `timecraft` binary.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A command isolated from the user's config and environment.
fn timecraft(temp: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("timecraft");
    cmd.arg("--config")
        .arg(temp.path().join("config.yaml"))
        .env_remove("TIMECRAFT_DEFAULT_FIELD")
        .env_remove("TIMECRAFT_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn format_date_prints_iso_date() {
    let temp = TempDir::new().unwrap();
    timecraft(&temp)
        .args(["format-date", "March 15, 2024"])
        .assert()
        .success()
        .stdout("2024-03-15\n");
}

#[test]
fn format_time_uses_twelve_hour_clock() {
    let temp = TempDir::new().unwrap();
    timecraft(&temp)
        .args(["format-time", "2024-03-15 14:30:00"])
        .assert()
        .success()
        .stdout("02:30:00 PM\n");
}

#[test]
fn add_days_crosses_leap_day() {
    let temp = TempDir::new().unwrap();
    timecraft(&temp)
        .args(["add-days", "2024-02-28", "1"])
        .assert()
        .success()
        .stdout("2024-02-29\n");

    timecraft(&temp)
        .args(["sub-days", "2024-03-01", "1"])
        .assert()
        .success()
        .stdout("2024-02-29\n");
}

#[test]
fn add_days_accepts_negative_counts() {
    let temp = TempDir::new().unwrap();
    timecraft(&temp)
        .args(["add-days", "2024-03-01", "-1"])
        .assert()
        .success()
        .stdout("2024-02-29\n");
}

#[test]
fn weekend_checks_saturday() {
    let temp = TempDir::new().unwrap();
    timecraft(&temp)
        .args(["weekend", "2024-03-16"])
        .assert()
        .success()
        .stdout("true\n");
}

#[test]
fn unparseable_date_fails() {
    let temp = TempDir::new().unwrap();
    timecraft(&temp)
        .args(["format-date", "the day after never"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("the day after never"));
}

#[test]
fn fractional_day_count_fails() {
    let temp = TempDir::new().unwrap();
    timecraft(&temp)
        .args(["add-days", "2024-02-28", "1.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid day count"));
}

#[test]
fn scope_prints_sql() {
    let temp = TempDir::new().unwrap();
    timecraft(&temp)
        .args(["scope", "today", "--table", "posts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SELECT * FROM posts WHERE date(created_at) = ?"));
}

#[test]
fn scope_field_comes_from_config_file() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("config.yaml"),
        "scopes:\n  default_field: published_at\n",
    )
    .unwrap();

    timecraft(&temp)
        .args(["scope", "current-year", "--table", "posts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("strftime('%Y', published_at)"));
}

#[test]
fn scope_field_env_overrides_config_file() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("config.yaml"),
        "scopes:\n  default_field: published_at\n",
    )
    .unwrap();

    timecraft(&temp)
        .env("TIMECRAFT_DEFAULT_FIELD", "issued_on")
        .args(["scope", "last-week", "--table", "invoices"])
        .assert()
        .success()
        .stdout(predicate::str::contains("issued_on BETWEEN ? AND ?"));
}

#[test]
fn scope_range_output_is_json() {
    let temp = TempDir::new().unwrap();
    let output = timecraft(&temp)
        .args([
            "scope",
            "--table",
            "posts",
            "--start",
            "2024-03-01",
            "--end",
            "2024-03-10 18:00:00",
            "--output",
            "json",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["scope"], "between_dates");
    assert_eq!(parsed["sql"], "SELECT * FROM posts WHERE created_at BETWEEN ? AND ?");
    assert_eq!(parsed["params"][1], "2024-03-10");
}

#[test]
fn scope_rejects_bad_table() {
    let temp = TempDir::new().unwrap();
    timecraft(&temp)
        .args(["scope", "today", "--table", "posts; DROP TABLE posts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid identifier"));
}

#[test]
fn broken_config_file_only_fails_commands_that_read_it() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("config.yaml"), "scopes: [oops]\n").unwrap();

    timecraft(&temp)
        .args(["format-date", "2024-03-15"])
        .assert()
        .success()
        .stdout("2024-03-15\n");

    timecraft(&temp)
        .args(["completions", "bash"])
        .assert()
        .success();

    timecraft(&temp)
        .args(["scope", "today", "--table", "posts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));

    timecraft(&temp)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn config_init_then_show() {
    let temp = TempDir::new().unwrap();
    timecraft(&temp)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Wrote default config"));

    let output = timecraft(&temp)
        .args(["config", "show", "--output", "json"])
        .output()
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["exists"], true);
    assert_eq!(parsed["config"]["scopes"]["default_field"], "created_at");
}

#[test]
fn completions_generate_script() {
    let temp = TempDir::new().unwrap();
    timecraft(&temp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("timecraft"));
}

#[test]
fn verbose_logs_to_stderr() {
    let temp = TempDir::new().unwrap();
    timecraft(&temp)
        .args(["-v", "scope", "today", "--table", "posts"])
        .assert()
        .success()
        .stderr(predicate::str::contains("applying date window"));
}
