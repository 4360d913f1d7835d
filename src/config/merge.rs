// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Profile merging.
//!
//! ```text
//! ProfileConfig + ProfileOverride --> field-by-field merge
//! ```
//!
//! Only explicitly set fields (`Some`) in the override replace base values.

use std::path::PathBuf;

use super::types::ProfileConfig;

/// Profile fields given explicitly, typically on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileOverride {
    pub local_path: Option<PathBuf>,
    pub remote_url: Option<String>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
}

impl ProfileOverride {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.local_path.is_none()
            && self.remote_url.is_none()
            && self.user_name.is_none()
            && self.user_email.is_none()
    }
}

pub(super) fn merge_profile(base: &ProfileConfig, overrides: &ProfileOverride) -> ProfileConfig {
    ProfileConfig {
        local_path: overrides
            .local_path
            .clone()
            .unwrap_or_else(|| base.local_path.clone()),
        remote_url: overrides
            .remote_url
            .clone()
            .unwrap_or_else(|| base.remote_url.clone()),
        user_name: overrides.user_name.clone().or_else(|| base.user_name.clone()),
        user_email: overrides
            .user_email
            .clone()
            .or_else(|| base.user_email.clone()),
    }
}
