// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Interpretation of git query output.

use std::path::Path;

use super::backend::CommandOutcome;
use crate::utility::encoding::non_empty_lines;

/// Branch every recipe works on, and the fallback name for a detached or
/// unborn HEAD.
pub const DEFAULT_BRANCH: &str = "main";

/// Name of the remote every recipe works against.
pub const REMOTE: &str = "origin";

/// True when `path` holds git metadata.
#[must_use]
pub fn is_repository(path: &Path) -> bool {
    path.join(".git").exists()
}

/// Output of `branch --show-current`, or `main` when it is empty.
#[must_use]
pub fn branch_or_default(raw: &str) -> String {
    let branch = raw.trim();
    if branch.is_empty() {
        DEFAULT_BRANCH.to_string()
    } else {
        branch.to_string()
    }
}

/// Number of changed paths in `status --porcelain` output.
///
/// One line per path, so a rename counts once.
#[must_use]
pub fn count_changes(porcelain: &str) -> usize {
    non_empty_lines(porcelain).count()
}

/// Parses a `rev-list --count` outcome.
///
/// `None` when the command failed (no upstream, unknown ref) or printed
/// something other than a number. A successful `0` stays `Some(0)`.
#[must_use]
pub fn parse_count(outcome: &CommandOutcome) -> Option<u32> {
    if !outcome.success() {
        return None;
    }
    outcome.stdout.trim().parse().ok()
}
