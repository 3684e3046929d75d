//! Integration tests for basic CLI behavior.
//!
//! Only offline subcommands are exercised; nothing here touches the network.

#![allow(deprecated)] // cargo_bin deprecation — replacement not yet stable

use assert_cmd::Command;
use predicates::prelude::*;

const NO_CONFIG: &str = "/nonexistent/replay-catalog/config.toml";

fn replay_catalog() -> Command {
    let mut cmd =
        Command::cargo_bin("replay-catalog").expect("binary 'replay-catalog' should be built");
    cmd.env_remove("RUST_LOG");
    cmd
}

// ─── Top-level flags ─────────────────────────────────────────────────────────

#[test]
fn help_flag_lists_subcommands() {
    replay_catalog()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: replay-catalog"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("url"))
        .stdout(predicate::str::contains("path"))
        .stdout(predicate::str::contains("providers"));
}

#[test]
fn version_flag_shows_semver() {
    replay_catalog()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^replay-catalog \d+\.\d+\.\d+\n$").unwrap());
}

#[test]
fn unknown_subcommand_fails() {
    replay_catalog()
        .arg("download")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

// ─── providers ───────────────────────────────────────────────────────────────

#[test]
fn providers_lists_francetv() {
    replay_catalog()
        .args(["--config", NO_CONFIG, "providers"])
        .assert()
        .success()
        .stdout("francetv\n");
}

// ─── path ────────────────────────────────────────────────────────────────────

#[test]
fn path_for_daily_show() {
    replay_catalog()
        .args([
            "--config", NO_CONFIG, "path", "--show", "Le Journal", "--date", "2023-05-01", "--id",
            "abc123",
        ])
        .assert()
        .success()
        .stdout("Le Journal/Season 2023/Le Journal - 2023-05-01 - abc123.mp4\n");
}

#[test]
fn path_for_numbered_episode() {
    replay_catalog()
        .args([
            "--config", NO_CONFIG, "path", "--show", "Drama", "--season", "2", "--episode", "5",
            "--title", "Pilot",
        ])
        .assert()
        .success()
        .stdout("Drama/Season 02/Drama - s02e05 - Pilot.mp4\n");
}

#[test]
fn path_rejects_bad_date() {
    replay_catalog()
        .args(["--config", NO_CONFIG, "path", "--show", "Drama", "--date", "01/05/2023"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn path_rejects_unknown_provider() {
    replay_catalog()
        .args(["--config", NO_CONFIG, "path", "--provider", "arte", "--show", "Drama"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown provider: arte"));
}

#[test]
fn invalid_config_is_reported() {
    let dir = std::env::temp_dir().join(format!("replay-catalog-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, "[francetv]\ncatalog_limit = 0\n").unwrap();

    replay_catalog()
        .arg("--config")
        .arg(&path)
        .arg("providers")
        .assert()
        .failure()
        .stderr(predicate::str::contains("catalog_limit"));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn list_without_criteria_fails() {
    replay_catalog()
        .args(["--config", NO_CONFIG, "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to look for"));
}
