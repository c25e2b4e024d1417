//! Integration tests for lambda-prune CLI output behavior.
//!
//! Every case here fails during configuration, before an AWS client is built,
//! so no credentials or network are needed.

use std::process::{Command, Output};

use tempfile::TempDir;

const ENV_VARS: [&str; 5] = [
    "FILTER",
    "RETRIES",
    "RETRY_MIN_TIMEOUT",
    "RETRY_MAX_TIMEOUT",
    "PAGE_DELAY",
];

/// Run lambda-prune with an isolated HOME and no config env vars.
fn run_prune(home: &TempDir, args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_lambda-prune"));
    command.args(args).env("HOME", home.path()).env("NO_COLOR", "1");
    for var in ENV_VARS {
        command.env_remove(var);
    }
    for (key, value) in env {
        command.env(key, value);
    }
    command
        .output()
        .unwrap_or_else(|e| panic!("Failed to execute lambda-prune {:?}: {}", args, e))
}

const INVERTED_TIMEOUTS: [&str; 5] = [
    "--retry-min-timeout",
    "9000",
    "--retry-max-timeout",
    "10",
    "functions",
];

#[test]
fn test_help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    let output = run_prune(&home, &["--help"], &[]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("prune"));
    assert!(stdout.contains("functions"));
    assert!(stdout.contains("versions"));
}

#[test]
fn test_invalid_timeouts_fail_before_any_api_call() {
    let home = TempDir::new().unwrap();
    let output = run_prune(&home, &INVERTED_TIMEOUTS, &[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid configuration"),
        "expected validation error, stderr: {}",
        stderr
    );
    assert!(String::from_utf8_lossy(&output.stdout).is_empty());
}

#[test]
fn test_default_mode_suppresses_info_logs() {
    let home = TempDir::new().unwrap();
    let output = run_prune(&home, &INVERTED_TIMEOUTS, &[]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains(r#""level":"INFO""#),
        "Default mode should suppress INFO logs, but stderr contains: {}",
        stderr
    );
    assert!(!stderr.contains("cli.command_started"));
}

#[test]
fn test_verbose_mode_emits_startup_event() {
    let home = TempDir::new().unwrap();
    let mut args = vec!["-v"];
    args.extend_from_slice(&INVERTED_TIMEOUTS);
    let output = run_prune(&home, &args, &[]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("core.app.startup_completed"),
        "Verbose mode should log startup, stderr: {}",
        stderr
    );
    // Events from the binary's own modules must pass the filter too.
    assert!(
        stderr.contains("cli.command_started"),
        "Verbose mode should log cli events, stderr: {}",
        stderr
    );
}

#[test]
fn test_unparseable_env_value_is_reported() {
    let home = TempDir::new().unwrap();
    let output = run_prune(&home, &["functions"], &[("RETRIES", "plenty")]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("RETRIES"), "stderr: {}", stderr);
}

#[test]
fn test_cli_flag_overrides_env_before_validation() {
    let home = TempDir::new().unwrap();
    // The flag's max replaces the env max before validation runs.
    let output = run_prune(
        &home,
        &["--retry-max-timeout", "10", "versions", "f1"],
        &[("RETRY_MIN_TIMEOUT", "20"), ("RETRY_MAX_TIMEOUT", "5")],
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid configuration: retry min timeout (20 ms) exceeds max timeout (10 ms)"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_missing_explicit_config_file_is_an_error() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("missing.toml");
    let output = run_prune(
        &home,
        &["--config", missing.to_str().unwrap(), "prune"],
        &[],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Config file not found"), "stderr: {}", stderr);
}

#[test]
fn test_user_config_file_is_validated() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".lambda-prune");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "page_size = 0\n").unwrap();

    let output = run_prune(&home, &["functions"], &[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("page size must be between"), "stderr: {}", stderr);
}
