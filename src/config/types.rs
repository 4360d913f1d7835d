// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for gitsync-rs.
//!
//! ```text
//! Config: GlobalConfig, GitConfig, profiles
//! ProfileConfig: one repository (path, remote, identity)
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ConfigError, SyncResult};
use crate::git::backend::{DEFAULT_TIMEOUT, ShellBackend};
use crate::git::repository::RepositoryConfig;
use crate::logging::LogLevel;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-5).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-5).
    pub file_log_level: LogLevel,
    /// Path to log file. No file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Write the log file as JSON lines.
    pub log_json: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::WARN,
            file_log_level: LogLevel::DEBUG,
            log_file: None,
            log_json: false,
        }
    }
}

/// How git is invoked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    /// Git executable, a name looked up on `PATH` or a path.
    pub binary: String,
    /// Per-command timeout in seconds; 0 disables it.
    pub timeout_secs: u64,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            binary: "git".to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl GitConfig {
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        match self.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Resolves the configured binary into a backend.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ProcessError::ExecutableNotFound`] if the
    /// binary cannot be found.
    pub fn backend(&self) -> SyncResult<ShellBackend> {
        Ok(ShellBackend::resolve(&self.binary)?.with_timeout(self.timeout()))
    }

    pub(super) fn validate(&self) -> SyncResult<()> {
        if self.binary.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                section: "git".to_string(),
                key: "binary".to_string(),
                message: "must not be empty".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// One configured repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileConfig {
    pub local_path: PathBuf,
    pub remote_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
}

impl ProfileConfig {
    /// Checks that the path and remote are present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] naming `section` for the first
    /// empty required key.
    pub fn validate(&self, section: &str) -> SyncResult<()> {
        let missing = if self.local_path.as_os_str().is_empty() {
            Some("local_path")
        } else if self.remote_url.trim().is_empty() {
            Some("remote_url")
        } else {
            None
        };

        match missing {
            Some(key) => Err(ConfigError::MissingKey {
                section: section.to_string(),
                key: key.to_string(),
            }
            .into()),
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn to_repository(&self) -> RepositoryConfig {
        RepositoryConfig::builder()
            .local_path(self.local_path.clone())
            .remote_url(self.remote_url.trim())
            .maybe_user_name(self.user_name.clone())
            .maybe_user_email(self.user_email.clone())
            .build()
    }
}
