// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for gitsync-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. gitsync.toml (cwd, optional)
//! 3. --ini FILE (repeatable)
//! 4. GITSYNC_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! GITSYNC_GLOBAL__OUTPUT_LOG_LEVEL=4 → global.output_log_level = 4
//! GITSYNC_GIT__TIMEOUT_SECS=30       → git.timeout_secs = 30
//! GITSYNC_PROFILES__NOTES__REMOTE_URL=… → profiles.notes.remote_url
//! ```
//!
//! # Profiles
//!
//! ```toml
//! [profiles.notes]
//! local_path = "/home/me/notes"
//! remote_url = "https://example.com/me/notes.git"
//! user_name = "Me"
//! user_email = "me@example.com"
//! ```

pub mod loader;
pub mod merge;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result, SyncResult};
use crate::git::repository::RepositoryConfig;

use loader::ConfigLoader;
use merge::ProfileOverride;
use types::{GitConfig, GlobalConfig, ProfileConfig};

/// Default configuration file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "gitsync.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "GITSYNC";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Git invocation.
    pub git: GitConfig,
    /// Named repositories.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub profiles: BTreeMap<String, ProfileConfig>,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gitsync_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("gitsync.toml")
    ///     .with_env_prefix("GITSYNC")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or fails validation.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Checks the git section and every profile.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] for a profile without
    /// `local_path` or `remote_url`, and [`ConfigError::InvalidValue`] for an
    /// empty git binary.
    pub fn validate(&self) -> SyncResult<()> {
        self.git.validate()?;
        for (name, profile) in &self.profiles {
            profile.validate(&format!("profiles.{name}"))?;
        }
        Ok(())
    }

    /// Looks up a profile by name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownProfile`] if no such profile exists.
    pub fn profile(&self, name: &str) -> SyncResult<&ProfileConfig> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile(name.to_string()).into())
    }

    /// Builds the repository configuration for one invocation.
    ///
    /// Starts from the named profile (or nothing), then applies `overrides`
    /// field by field.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownProfile`] for an unknown profile and
    /// [`ConfigError::MissingKey`] if the result lacks a path or remote.
    pub fn repository(
        &self,
        profile: Option<&str>,
        overrides: &ProfileOverride,
    ) -> SyncResult<RepositoryConfig> {
        let base = match profile {
            Some(name) => self.profile(name)?.clone(),
            None => ProfileConfig::default(),
        };
        let merged = merge::merge_profile(&base, overrides);
        let section = profile.map_or_else(|| "cli".to_string(), |name| format!("profiles.{name}"));
        merged.validate(&section)?;
        Ok(merged.to_repository())
    }

    /// One line per profile: `name  path -> remote`.
    #[must_use]
    pub fn format_profiles(&self) -> Vec<String> {
        let width = self.profiles.keys().map(String::len).max().unwrap_or(0);
        self.profiles
            .iter()
            .map(|(name, profile)| {
                format!(
                    "{name:<width$}  {} -> {}",
                    profile.local_path.display(),
                    profile.remote_url
                )
            })
            .collect()
    }
}
