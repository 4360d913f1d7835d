// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{CommandOutcome, DEFAULT_TIMEOUT, GitBackend, ShellBackend};
use crate::error::{ProcessError, SyncError};
use std::time::Duration;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

#[tokio::test]
async fn test_shell_backend_init_and_probe() {
    let temp = temp_dir();
    let backend = ShellBackend::default();

    let outcome = backend
        .exec(&["rev-parse", "--is-inside-work-tree"], temp.path())
        .await
        .expect("git should run");
    assert!(!outcome.success(), "empty dir is not a work tree");

    let outcome = backend
        .exec(&["init", "--quiet"], temp.path())
        .await
        .expect("git init should run");
    assert!(outcome.success());
    assert!(temp.path().join(".git").is_dir());

    let outcome = backend
        .exec(&["rev-parse", "--is-inside-work-tree"], temp.path())
        .await
        .expect("git should run");
    assert_eq!(outcome.stdout.trim(), "true");
}

#[tokio::test]
async fn test_shell_backend_argument_is_not_shell_interpreted() {
    let temp = temp_dir();
    let backend = ShellBackend::default();
    backend
        .exec(&["init", "--quiet"], temp.path())
        .await
        .expect("git init should run");

    let url = "https://example.com/repo.git; touch pwned";
    let outcome = backend
        .exec(&["remote", "add", "origin", url], temp.path())
        .await
        .expect("git should run");
    assert!(outcome.success());
    assert!(!temp.path().join("pwned").exists());

    let outcome = backend
        .exec(&["remote", "get-url", "origin"], temp.path())
        .await
        .expect("git should run");
    assert_eq!(outcome.stdout.trim(), url);
}

#[tokio::test]
async fn test_shell_backend_failure_is_an_outcome() {
    let temp = temp_dir();
    let outcome = ShellBackend::default()
        .exec(&["remote", "get-url", "origin"], temp.path())
        .await
        .expect("non-zero exit is not an error");

    assert!(!outcome.success());
    assert!(!outcome.stderr.is_empty());
}

#[tokio::test]
async fn test_missing_binary_is_a_process_error() {
    let temp = temp_dir();
    let err = ShellBackend::new("nonexistent_git_12345")
        .exec(&["status"], temp.path())
        .await
        .expect_err("spawn should fail");

    assert!(matches!(err, SyncError::Process(ref e) if matches!(**e, ProcessError::ExecutableNotFound { .. })));
}

#[test]
fn test_resolve() {
    let backend = ShellBackend::resolve("git").expect("git should be on PATH");
    assert!(backend.binary().is_absolute());
    assert_eq!(backend.timeout(), Some(DEFAULT_TIMEOUT));

    assert!(ShellBackend::resolve("nonexistent_git_12345").is_err());
    assert!(ShellBackend::resolve("/definitely/not/here/git").is_err());

    let backend = backend.with_timeout(Some(Duration::from_secs(5)));
    assert_eq!(backend.timeout(), Some(Duration::from_secs(5)));
}

#[test]
fn test_outcome_diagnostic_prefers_stderr_errors() {
    let outcome = CommandOutcome {
        exit_code: 1,
        stdout: "some stdout\n".to_string(),
        stderr: "  fatal: bad thing\n".to_string(),
    };
    assert_eq!(outcome.diagnostic(), "fatal: bad thing");

    let outcome = CommandOutcome {
        exit_code: 1,
        stdout: "nothing to commit, working tree clean\n".to_string(),
        stderr: String::new(),
    };
    assert_eq!(outcome.diagnostic(), "nothing to commit, working tree clean");

    insta::assert_snapshot!(CommandOutcome::failed(128, "").diagnostic(), @"exit code 128");
}

#[test]
fn test_outcome_diagnostic_keeps_stdout_after_progress() {
    let outcome = CommandOutcome {
        exit_code: 1,
        stdout: "Auto-merging notes.md\nCONFLICT (content): Merge conflict in notes.md\n".to_string(),
        stderr: "From /srv/remote\n * branch            main       -> FETCH_HEAD\n".to_string(),
    };
    insta::assert_snapshot!(outcome.diagnostic(), @r"
    From /srv/remote
     * branch            main       -> FETCH_HEAD
    Auto-merging notes.md
    CONFLICT (content): Merge conflict in notes.md
    ");
}
