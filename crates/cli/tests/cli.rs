//! CLI argument handling tests
//!
//! These tests drive the real binary but never reach the network: every
//! case fails argument validation (exit code 2) or runs a purely local
//! command. Safe to run without any S3 server.

use std::process::{Command, Output};

use tempfile::TempDir;

fn run_s3mgr(args: &[&str], config_dir: &std::path::Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_s3mgr"))
        .args(args)
        .env("S3MGR_CONFIG_DIR", config_dir)
        .output()
        .expect("Failed to execute s3mgr")
}

#[test]
fn test_no_arguments_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let output = run_s3mgr(&[], dir.path());
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_unknown_subcommand_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let output = run_s3mgr(&["frobnicate", "mybucket"], dir.path());
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage") || stderr.contains("usage"));
}

#[test]
fn test_upload_missing_file_argument() {
    let dir = TempDir::new().unwrap();
    let output = run_s3mgr(&["upload", "mybucket"], dir.path());
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_download_missing_destination_argument() {
    let dir = TempDir::new().unwrap();
    let output = run_s3mgr(&["download", "mybucket", "report.pdf"], dir.path());
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_invalid_bucket_name_fails_before_network() {
    let dir = TempDir::new().unwrap();

    // Uppercase bucket names are rejected locally
    let output = run_s3mgr(&["delete-bucket", "MyBucket"], dir.path());
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid bucket name"));

    // Too-short names as well
    let output = run_s3mgr(&["delete-all-files", "ab"], dir.path());
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_invalid_key_fails_before_network() {
    let dir = TempDir::new().unwrap();
    let output = run_s3mgr(&["delete-file", "mybucket", "/leading-slash"], dir.path());
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid object key"));
}

#[test]
fn test_upload_nonexistent_local_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.bin");
    let output = run_s3mgr(
        &["upload", "mybucket", missing.to_str().unwrap()],
        dir.path(),
    );
    // A missing local file is caught before any network call
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("File not found"));
}

#[test]
fn test_invalid_endpoint_url_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let output = run_s3mgr(
        &[
            "delete-bucket",
            "mybucket",
            "--endpoint-url",
            "not a url",
        ],
        dir.path(),
    );
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_invalid_endpoint_url_error_is_json_in_json_mode() {
    let dir = TempDir::new().unwrap();
    let output = run_s3mgr(
        &[
            "delete-bucket",
            "mybucket",
            "--endpoint-url",
            "not a url",
            "--json",
        ],
        dir.path(),
    );
    assert_eq!(output.status.code(), Some(2));
    let parsed: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert!(parsed["error"].as_str().unwrap().contains("Invalid URL"));
}

#[test]
fn test_completions_bash() {
    let dir = TempDir::new().unwrap();
    let output = run_s3mgr(&["completions", "bash"], dir.path());
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("s3mgr"));
}

#[test]
fn test_help_exits_zero() {
    let dir = TempDir::new().unwrap();
    let output = run_s3mgr(&["--help"], dir.path());
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("upload"));
    assert!(stdout.contains("delete-bucket"));
}
