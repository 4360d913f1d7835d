// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! CommandRunner
//!      |
//!      v
//!  GitBackend (trait, object safe)
//!      |
//!      +--> ShellBackend   git CLI via ProcessBuilder
//!      |                   argument vector, explicit cwd,
//!      |                   GCM_INTERACTIVE=never, GIT_TERMINAL_PROMPT=0
//!      |
//!      +--> (test doubles) scripted outcomes
//! ```
//!
//! A backend only executes. It never interprets exit codes: a non-zero
//! exit is a normal [`CommandOutcome`], and only spawn/timeout problems are
//! errors.

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::process::builder::{ProcessBuilder, ProcessFlags, ProcessOutput};
use crate::error::{ProcessError, SyncResult};

/// Default per-command timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

/// Result of one git invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutcome {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutcome {
    /// A successful outcome with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed outcome with the given exit code and stderr.
    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// The most useful diagnostic text.
    ///
    /// An `error:`/`fatal:` line on stderr speaks for itself. Otherwise both
    /// streams are kept: `pull` writes its fetch progress to stderr and the
    /// merge conflicts to stdout.
    #[must_use]
    pub fn diagnostic(&self) -> String {
        let stderr = self.stderr.trim();
        let stdout = self.stdout.trim();
        let stderr_has_error = stderr
            .lines()
            .any(|line| line.starts_with("error:") || line.starts_with("fatal:"));

        match (stderr.is_empty(), stdout.is_empty()) {
            (false, _) if stderr_has_error => stderr.to_string(),
            (false, false) => format!("{stderr}\n{stdout}"),
            (false, true) => stderr.to_string(),
            (true, false) => stdout.to_string(),
            (true, true) => format!("exit code {}", self.exit_code),
        }
    }
}

impl From<ProcessOutput> for CommandOutcome {
    fn from(output: ProcessOutput) -> Self {
        let (exit_code, stdout, stderr) = output.into_parts();
        Self {
            exit_code,
            stdout,
            stderr,
        }
    }
}

/// Executes git with an argument vector in a working directory.
pub trait GitBackend: Send + Sync {
    /// Run `git <args>` rooted at `cwd`.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if git cannot be spawned or times out.
    /// A non-zero exit is not an error.
    fn exec<'a>(&'a self, args: &'a [&'a str], cwd: &'a Path)
    -> BoxFuture<'a, SyncResult<CommandOutcome>>;
}

// --- ShellBackend Implementation (Git CLI) ---

/// Shell-based git backend using the git CLI.
///
/// Credential helpers are told never to prompt so a missing credential
/// fails the command instead of hanging the worker.
#[derive(Debug, Clone)]
pub struct ShellBackend {
    binary: PathBuf,
    timeout: Option<Duration>,
}

impl Default for ShellBackend {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("git"),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

impl ShellBackend {
    /// Creates a backend for the given git executable.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            ..Self::default()
        }
    }

    /// Resolves `program` (a name on PATH or a path) to a backend.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` when the program cannot be found.
    pub fn resolve(program: &str) -> SyncResult<Self> {
        let candidate = Path::new(program);
        if candidate.components().count() > 1 {
            if candidate.is_file() {
                return Ok(Self::new(candidate));
            }
            return Err(ProcessError::ExecutableNotFound {
                name: program.to_string(),
            }
            .into());
        }
        Ok(Self::new(ProcessBuilder::which(program)?.program()))
    }

    /// Sets the per-command timeout. `None` disables it.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn command(&self, args: &[&str], cwd: &Path) -> ProcessBuilder {
        let builder = ProcessBuilder::new(&self.binary)
            .name("git")
            .args(args)
            .cwd(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .flags(ProcessFlags::HIDE_WINDOW);

        match self.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        }
    }
}

impl GitBackend for ShellBackend {
    fn exec<'a>(
        &'a self,
        args: &'a [&'a str],
        cwd: &'a Path,
    ) -> BoxFuture<'a, SyncResult<CommandOutcome>> {
        async move {
            let output = self.command(args, cwd).run().await?;
            Ok(CommandOutcome::from(output))
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests;
