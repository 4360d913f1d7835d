// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration loading from multiple sources.
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file_optional("gitsync.toml")
//!   .add_toml_file(--ini)...
//!   .with_env_prefix("GITSYNC")
//!   .set(cli overrides)
//!        |
//!        v
//!    build() --> Config (validated)
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Environment, File, FileFormat};

use super::Config;
use crate::error::Result;

/// Separator between nested keys in environment variable names.
pub const ENV_SEPARATOR: &str = "__";

/// Builder for loading configuration from multiple sources.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    env_vars: Option<HashMap<String, String>>,
    files: Vec<PathBuf>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            env_vars: None,
            files: Vec::new(),
        }
    }

    /// Adds a TOML file that must exist and parse.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(true));
        self.files.push(path.to_path_buf());
        self
    }

    /// Adds a TOML file that is skipped when absent.
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(false));
        if path.exists() {
            self.files.push(path.to_path_buf());
        }
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self
    }

    /// Reads `<PREFIX>_SECTION__KEY` variables, e.g. `GITSYNC_GIT__TIMEOUT_SECS`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Takes environment variables from `vars` instead of the process.
    #[must_use]
    pub fn with_env_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.env_vars = Some(vars);
        self
    }

    /// Sets a configuration override, such as `global.output_log_level`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a valid configuration path.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|e| anyhow::anyhow!("config error: {e}"))?;
        Ok(self)
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A required file is missing or is not valid TOML.
    /// - A value has the wrong type or is out of range.
    /// - A profile lacks `local_path` or `remote_url`.
    pub fn build(self) -> Result<Config> {
        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true)
                    .source(self.env_vars),
            ),
            None => self.builder,
        };
        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Files that were or will be read, in load order.
    #[must_use]
    pub fn loaded_files(&self) -> &[PathBuf] {
        &self.files
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
