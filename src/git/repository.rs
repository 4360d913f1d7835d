// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-invocation repository configuration.

use bon::Builder;
use std::path::{Path, PathBuf};

/// Where a repository lives, where it syncs to, and who commits.
///
/// Built fresh for every invocation and never mutated afterwards.
///
/// ```
/// use gitsync_rs::git::RepositoryConfig;
///
/// let config = RepositoryConfig::builder()
///     .local_path("/tmp/notes")
///     .remote_url("https://example.com/notes.git")
///     .user_name("Me")
///     .user_email("me@example.com")
///     .build();
/// assert_eq!(config.identity(), Some(("Me", "me@example.com")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct RepositoryConfig {
    #[builder(into)]
    local_path: PathBuf,
    #[builder(into)]
    remote_url: String,
    #[builder(into)]
    user_name: Option<String>,
    #[builder(into)]
    user_email: Option<String>,
}

impl RepositoryConfig {
    #[must_use]
    pub fn local_path(&self) -> &Path {
        &self.local_path
    }

    #[must_use]
    pub fn remote_url(&self) -> &str {
        &self.remote_url
    }

    #[must_use]
    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    #[must_use]
    pub fn user_email(&self) -> Option<&str> {
        self.user_email.as_deref()
    }

    /// `(name, email)` when both are set and non-empty.
    #[must_use]
    pub fn identity(&self) -> Option<(&str, &str)> {
        let name = self.user_name().filter(|name| !name.trim().is_empty())?;
        let email = self.user_email().filter(|email| !email.trim().is_empty())?;
        Some((name, email))
    }
}
