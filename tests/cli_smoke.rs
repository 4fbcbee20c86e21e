#![allow(clippy::unwrap_used)]
//! CLI smoke tests to verify basic binary behavior.
//!
//! The chat loop itself needs a terminal, so these tests only cover the
//! non-interactive surface: help, version, and fatal startup paths.

use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn chatterbox() -> Command {
    Command::cargo_bin("chatterbox").unwrap()
}

#[test]
fn test_help_displays_usage() {
    chatterbox()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Interactive streaming chat CLI"));
}

#[test]
fn test_version_displays_version() {
    chatterbox()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_rejects_unexpected_arguments() {
    chatterbox().arg("frobnicate").assert().failure();
}

#[test]
fn test_missing_credential_without_terminal_is_fatal() {
    let temp_dir = tempfile::TempDir::new().unwrap();

    // No API key in the environment and no terminal for the fallback
    // prompt: startup must fail rather than enter the loop.
    chatterbox()
        .env("XDG_CONFIG_HOME", temp_dir.path())
        .env_remove("GOOGLE_API_KEY")
        .write_stdin("")
        .assert()
        .failure();
}
