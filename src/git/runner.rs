// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The single primitive every recipe step goes through.
//!
//! ```text
//!               emits "▶ desc"   non-zero exit
//! run()         yes              GitError::CommandFailed
//! attempt()     yes              returned as CommandOutcome
//! run_silent()  no               ignored, stdout returned
//! probe()       no               returned as CommandOutcome
//! ```
//!
//! Process errors (missing binary, timeout) always propagate.

use std::path::Path;
use tracing::debug;

use super::backend::{CommandOutcome, GitBackend};
use crate::error::{GitError, SyncError, SyncResult};
use crate::worker::events::{EventSink, ProgressEvent, RepoStatus, Severity};

/// Runs git commands rooted at one repository and narrates them.
pub struct CommandRunner<'a> {
    backend: &'a dyn GitBackend,
    cwd: &'a Path,
    sink: &'a dyn EventSink,
}

impl<'a> CommandRunner<'a> {
    pub fn new(backend: &'a dyn GitBackend, cwd: &'a Path, sink: &'a dyn EventSink) -> Self {
        Self { backend, cwd, sink }
    }

    /// The repository directory every command runs in.
    #[must_use]
    pub const fn cwd(&self) -> &'a Path {
        self.cwd
    }

    /// Emits a progress message.
    pub fn progress(&self, severity: Severity, message: impl Into<String>) {
        self.sink.on_progress(ProgressEvent::new(severity, message));
    }

    /// Publishes a structured status snapshot.
    pub fn report_status(&self, status: RepoStatus) {
        self.sink.on_status(status);
    }

    /// Runs a command without narration and returns its full outcome.
    ///
    /// # Errors
    ///
    /// Returns a process error if git cannot be run.
    pub async fn probe(&self, args: &[&str]) -> SyncResult<CommandOutcome> {
        self.backend.exec(args, self.cwd).await
    }

    /// Runs a command without narration, returning trimmed stdout whatever
    /// the exit code.
    ///
    /// # Errors
    ///
    /// Returns a process error if git cannot be run.
    pub async fn run_silent(&self, args: &[&str]) -> SyncResult<String> {
        let outcome = self.probe(args).await?;
        if !outcome.success() {
            debug!(args = ?args, exit_code = outcome.exit_code, "silent command failed");
        }
        Ok(outcome.stdout.trim().to_string())
    }

    /// Narrates and runs a command, returning the outcome for the caller to
    /// branch on.
    ///
    /// # Errors
    ///
    /// Returns a process error if git cannot be run.
    pub async fn attempt(&self, args: &[&str], description: &str) -> SyncResult<CommandOutcome> {
        self.progress(Severity::Info, format!("▶ {description}"));
        self.probe(args).await
    }

    /// Narrates and runs a command that must succeed.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` on a non-zero exit, or a process
    /// error if git cannot be run.
    pub async fn run(&self, args: &[&str], description: &str) -> SyncResult<String> {
        let outcome = self.attempt(args, description).await?;
        if !outcome.success() {
            return Err(Self::failure(description, &outcome));
        }
        Ok(outcome.stdout.trim().to_string())
    }

    /// Builds the error for a failed step.
    #[must_use]
    pub fn failure(description: &str, outcome: &CommandOutcome) -> SyncError {
        GitError::CommandFailed {
            description: description.to_string(),
            message: outcome.diagnostic(),
        }
        .into()
    }
}
