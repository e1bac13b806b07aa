//! Integration tests for CLI argument handling
//!
//! Runs the binary against a temporary cache directory. None of these
//! tests reach the network.

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Helper to run the CLI in a cache directory and capture output
fn run_cli(cache_dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_holocron"))
        .args(args)
        .env("HOLOCRON_CACHE_DIR", cache_dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute holocron")
}

#[test]
fn test_help_flag_exits_successfully() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(temp_dir.path(), &["--help"]);
    assert!(output.status.success(), "Expected --help to exit successfully");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("holocron"));
    assert!(stdout.contains("--name"));
    assert!(stdout.contains("--world"));
}

#[test]
fn test_unknown_operation_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(temp_dir.path(), &["destroy"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid value"), "unexpected stderr: {}", stderr);
}

#[test]
fn test_search_without_name_prints_unsupported() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(temp_dir.path(), &["search"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("This operation, I support not"));
    assert!(
        !temp_dir.path().join("cache_stats.json").exists(),
        "an unsupported search is not recorded"
    );
}

#[test]
fn test_statistics_with_empty_cache() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(temp_dir.path(), &["statistics"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "No stats to report");
}

#[test]
fn test_statistics_reads_cache_files() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("cache_stats.json"),
        r#"{"hours": ["10", "10", "15", "15"]}"#,
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("cache_character.json"),
        r#"{"Luke Skywalker": [{"properties": {"name": "Luke Skywalker"}}, "2024-05-04 10:00:00.000000", 3]}"#,
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("cache_world.json"),
        r#"{"1": [{"properties": {"name": "Tatooine"}}, "2024-05-04 10:00:00.000000", 1]}"#,
    )
    .unwrap();

    let output = run_cli(temp_dir.path(), &["statistics"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("10: 2 (50.00%)"));
    assert!(stdout.contains("15: 2 (50.00%)"));
    assert!(stdout.contains("Character Luke Skywalker was searched 3 time(s)"));
    assert!(stdout.contains("Planet Tatooine was searched 1 time(s)"));
    assert!(stdout.contains("We had 3/4 successful searche(s) (75.00%)"));
}

#[test]
fn test_clean_cache_removes_files() {
    let temp_dir = TempDir::new().unwrap();
    for file in ["cache_stats.json", "cache_character.json", "cache_world.json"] {
        fs::write(temp_dir.path().join(file), "{}").unwrap();
    }

    let output = run_cli(temp_dir.path(), &["clean_cache"]);
    assert!(output.status.success());

    for file in ["cache_stats.json", "cache_character.json", "cache_world.json"] {
        assert!(!temp_dir.path().join(file).exists(), "{} should be removed", file);
    }

    let output = run_cli(temp_dir.path(), &["statistics"]);
    assert!(String::from_utf8_lossy(&output.stdout).contains("No stats to report"));
}

#[test]
fn test_clean_cache_on_empty_directory() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(temp_dir.path(), &["clean_cache"]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}
