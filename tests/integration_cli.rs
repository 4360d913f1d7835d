// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the `gitsync` binary.
//!
//! Runs the built executable against temporary directories.

use clap::Parser;
use gitsync_rs::cli::{Cli, Command as CliCommand};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn gitsync(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gitsync"))
        .args(args)
        .current_dir(cwd)
        .env_remove("GITSYNC_GLOBAL__OUTPUT_LOG_LEVEL")
        .output()
        .expect("gitsync runs")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn cli_status_alias() {
    let cli = Cli::try_parse_from(["gitsync", "status-check", "-p", "notes"]).unwrap();
    assert!(matches!(cli.command, Some(CliCommand::Status(_))));
}

#[test]
fn cli_unknown_subcommand_rejected() {
    assert!(Cli::try_parse_from(["gitsync", "frobnicate"]).is_err());
}

// =============================================================================
// Binary
// =============================================================================

#[test]
fn binary_prints_version() {
    let temp = temp_dir();
    let output = gitsync(&["version"], temp.path());
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), env!("CARGO_PKG_VERSION"));
}

#[test]
fn binary_lists_profiles_from_config_file() {
    let temp = temp_dir();
    std::fs::write(
        temp.path().join("gitsync.toml"),
        "[profiles.notes]\nlocal_path = \"notes\"\nremote_url = \"https://example/notes.git\"\n",
    )
    .unwrap();

    let output = gitsync(&["profiles"], temp.path());
    assert!(output.status.success());
    insta::assert_snapshot!(stdout(&output), @"notes  notes -> https://example/notes.git");
}

#[test]
fn binary_init_then_status() {
    let temp = temp_dir();
    let repo = temp.path().join("repo");
    let repo_arg = repo.to_string_lossy().into_owned();
    let args = |op: &'static str| {
        vec![
            op.to_string(),
            "--path".to_string(),
            repo_arg.clone(),
            "--remote".to_string(),
            "https://example/repo.git".to_string(),
        ]
    };

    let init_args = args("init");
    let init_refs: Vec<&str> = init_args.iter().map(String::as_str).collect();
    let output = gitsync(&init_refs, temp.path());
    assert!(output.status.success(), "{}", stdout(&output));
    assert!(stdout(&output).ends_with("✓ repository initialized and verified\n"));

    let mut status_args = args("status");
    status_args.push("--json".to_string());
    let status_refs: Vec<&str> = status_args.iter().map(String::as_str).collect();
    let output = gitsync(&status_refs, temp.path());
    assert!(output.status.success());

    let last = stdout(&output).lines().last().unwrap().to_string();
    insta::assert_snapshot!(
        last,
        @r#"{"event":"finished","success":true,"message":"status check complete"}"#
    );
}

#[test]
fn binary_fails_on_precondition() {
    let temp = temp_dir();
    let output = gitsync(
        &[
            "--no-default-config",
            "download",
            "--path",
            "missing",
            "--remote",
            "https://example/repo.git",
        ],
        temp.path(),
    );

    assert!(!output.status.success());
    assert!(
        stdout(&output).starts_with("✗ operation failed: local repository is not initialized"),
        "{}",
        stdout(&output)
    );
}

#[test]
fn binary_reports_missing_remote() {
    let temp = temp_dir();
    let output = gitsync(&["--no-default-config", "sync", "--path", "repo"], temp.path());

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("missing required config key 'remote_url' in section '[cli]'"),
        "{stderr}"
    );
}
