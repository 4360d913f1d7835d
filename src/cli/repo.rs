// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository selection shared by every operation command.

use clap::Args;
use std::path::PathBuf;

use crate::config::merge::ProfileOverride;

/// Which repository to operate on, and how to report.
#[derive(Debug, Clone, Default, Args)]
pub struct RepoArgs {
    /// Profile from the configuration to start from.
    #[arg(short = 'p', long = "profile", value_name = "NAME")]
    pub profile: Option<String>,

    /// Local repository directory, created if missing.
    #[arg(long = "path", value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Remote repository URL.
    #[arg(long = "remote", value_name = "URL")]
    pub remote: Option<String>,

    /// Commit author name.
    #[arg(long = "user-name", value_name = "NAME")]
    pub user_name: Option<String>,

    /// Commit author email.
    #[arg(long = "user-email", value_name = "EMAIL")]
    pub user_email: Option<String>,

    /// Runs a status check after the operation succeeds.
    #[arg(long)]
    pub refresh: bool,

    /// Prints events as JSON lines.
    #[arg(long)]
    pub json: bool,
}

impl RepoArgs {
    /// Explicit values that take precedence over the profile.
    #[must_use]
    pub fn overrides(&self) -> ProfileOverride {
        ProfileOverride {
            local_path: self.path.clone(),
            remote_url: self.remote.clone(),
            user_name: self.user_name.clone(),
            user_email: self.user_email.clone(),
        }
    }
}
