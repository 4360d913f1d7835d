// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!                 SyncError (~24 bytes)
//!                        |
//!   +------+------+------+------+-----+------+
//!   |      |      |      |      |     |      |
//!   v      v      v      v      v     v      v
//!  Git  Precond Process Config  Io  Unknown Busy
//!  Box    Box    Box     Box   Box  Box<str> Box
//!
//! Sub-errors (unboxed internally):
//!   Git          CommandFailed, Reconcile
//!   Precondition NotInitialized, NotARepository
//!   Process      ExecutableNotFound, SpawnFailed, Timeout, OutputError
//!   Config       MissingKey, InvalidValue, UnknownProfile
//!
//! All variants boxed => SyncError fits in 24 bytes.
//! ```

use std::path::Path;
use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`SyncError`].
pub type SyncResult<T> = std::result::Result<T, SyncError>;

/// Top-level error type of the sync core.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A git step failed.
    #[error("{0}")]
    Git(#[from] Box<GitError>),

    /// The repository is not in the state the operation requires.
    #[error("{0}")]
    Precondition(#[from] Box<PreconditionError>),

    /// Spawning or supervising the git process failed.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// The caller asked for an operation that does not exist.
    #[error("unknown operation: {0}")]
    UnknownOperation(Box<str>),

    /// Another operation already holds the repository.
    #[error("another operation is already running for {}", .0.display())]
    Busy(Box<Path>),
}

impl SyncError {
    /// Create a [`SyncError::UnknownOperation`] for the given name.
    pub fn unknown_operation(name: impl Into<String>) -> Self {
        Self::UnknownOperation(name.into().into_boxed_str())
    }

    /// Create a [`SyncError::Busy`] for the given repository path.
    pub fn busy(path: impl AsRef<Path>) -> Self {
        Self::Busy(path.as_ref().into())
    }

    /// Returns the precondition error, if this is one.
    #[must_use]
    pub fn as_precondition(&self) -> Option<&PreconditionError> {
        match self {
            Self::Precondition(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the git error, if this is one.
    #[must_use]
    pub fn as_git(&self) -> Option<&GitError> {
        match self {
            Self::Git(err) => Some(err),
            _ => None,
        }
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for SyncError {
                fn from(err: $error) -> Self {
                    SyncError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    PreconditionError => Precondition,
    ProcessError => Process,
    ConfigError => Config,
    std::io::Error => Io,
}

// --- Git Errors ---

/// Git step errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// A non-silent git command exited with a non-zero status.
    ///
    /// `message` is the outcome's diagnostic text.
    #[error("{description} failed: {message}")]
    CommandFailed {
        description: String,
        message: String,
    },

    /// Neither a rebase nor a merge could bring in the remote changes.
    #[error("could not reconcile with remote: {message}")]
    Reconcile { message: String },
}

// --- Precondition Errors ---

/// Invariants checked before any command of an operation runs.
#[derive(Debug, Error)]
pub enum PreconditionError {
    /// The operation requires an initialized repository.
    #[error("local repository is not initialized, run init first: {path}")]
    NotInitialized { path: String },

    /// The path is not a git repository.
    #[error("not a git repository: {path}")]
    NotARepository { path: String },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process timed out.
    #[error("process '{command}' timed out after {timeout_secs} seconds")]
    Timeout { command: String, timeout_secs: u64 },

    /// Failed to read process output or wait for the process.
    #[error("failed to read output from process '{command}': {message}")]
    OutputError { command: String, message: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Requested profile is not configured.
    #[error("profile '{0}' not found")]
    UnknownProfile(String),
}

#[cfg(test)]
mod tests;
