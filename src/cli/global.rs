// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --ini FILE          ← Additional config files (can repeat)
//! --log-level N       ← Console verbosity (0-5)
//! --file-log-level N  ← File verbosity (defaults to --log-level)
//! --log-file FILE     ← Enables the log file
//!
//! Precedence: CLI flags > GITSYNC_* env > --ini > gitsync.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::config::loader::ConfigLoader;
use crate::config::{DEFAULT_CONFIG_FILE, ENV_PREFIX};
use crate::error::Result;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times; later files win.
    #[arg(short = 'i', long = "ini", value_name = "FILE", action = clap::ArgAction::Append)]
    pub inis: Vec<PathBuf>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Disables loading `gitsync.toml` from the current directory.
    #[arg(long = "no-default-config")]
    pub no_default_config: bool,
}

impl GlobalOptions {
    /// Assembles the config loader for these options.
    ///
    /// # Errors
    ///
    /// Returns an error if an override key is rejected by the loader.
    pub fn config_loader(&self) -> Result<ConfigLoader> {
        let mut loader = ConfigLoader::new();
        if !self.no_default_config {
            loader = loader.add_toml_file_optional(DEFAULT_CONFIG_FILE);
        }
        for ini in &self.inis {
            loader = loader.add_toml_file(ini);
        }
        loader = loader.with_env_prefix(ENV_PREFIX);

        if let Some(level) = self.log_level {
            loader = loader.set("global.output_log_level", i64::from(level))?;
        }

        // file level falls back to the console level
        if let Some(level) = self.file_log_level.or(self.log_level) {
            loader = loader.set("global.file_log_level", i64::from(level))?;
        }

        if let Some(ref path) = self.log_file {
            loader = loader.set("global.log_file", path.display().to_string())?;
        }

        Ok(loader)
    }
}
