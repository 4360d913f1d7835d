// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ConfigError, GitError, PreconditionError, SyncError, SyncResult};

#[test]
fn test_config_error_display() {
    let err = ConfigError::MissingKey {
        section: "profiles.work".to_string(),
        key: "remote_url".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"missing required config key 'remote_url' in section '[profiles.work]'"
    );
}

#[test]
fn test_command_failed_display() {
    let err: SyncError = GitError::CommandFailed {
        description: "push to remote".to_string(),
        message: "fatal: repository not found".to_string(),
    }
    .into();
    insta::assert_snapshot!(err.to_string(), @"push to remote failed: fatal: repository not found");
    assert!(err.as_git().is_some());
}

#[test]
fn test_precondition_is_distinguishable() {
    let err: SyncError = PreconditionError::NotInitialized {
        path: "/tmp/repo".to_string(),
    }
    .into();
    assert!(matches!(
        err.as_precondition(),
        Some(PreconditionError::NotInitialized { .. })
    ));
    assert!(err.as_git().is_none());
}

#[test]
fn test_busy_display() {
    let err = SyncError::busy("/tmp/repo");
    insta::assert_snapshot!(err.to_string(), @"another operation is already running for /tmp/repo");
}

#[test]
fn test_sync_error_size() {
    // Box<str> / Box<Path> variants are 16 bytes (fat pointer: ptr + len)
    // With discriminant + alignment = 24 bytes
    let size = std::mem::size_of::<SyncError>();
    assert!(size <= 24, "SyncError is {size} bytes, expected <= 24");
}

#[test]
fn test_sync_result_size() {
    let size = std::mem::size_of::<SyncResult<()>>();
    assert!(size <= 24, "SyncResult<()> is {size} bytes, expected <= 24");
}
