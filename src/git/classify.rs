// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Classification of expected git failures.
//!
//! Recipes only tolerate failures they can name. Anything that does not
//! match a known pattern is [`FailureKind::Other`] and stays fatal.

use regex::Regex;

use super::backend::CommandOutcome;

/// Why a git command failed, as far as the recipes care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// `pull` against a branch the remote does not have yet.
    MissingRemoteRef,
    /// `commit` with nothing staged.
    NothingToCommit,
    /// `rm` with a pathspec matching no tracked file.
    NoMatchingFiles,
    /// A plain `pull` refusing to choose between merge and rebase.
    DivergentBranches,
    /// Anything else.
    Other,
}

const PATTERNS: [(&str, FailureKind); 4] = [
    (r"couldn't find remote ref", FailureKind::MissingRemoteRef),
    (r"nothing (added )?to commit", FailureKind::NothingToCommit),
    (r"did not match any files", FailureKind::NoMatchingFiles),
    (r"reconcile divergent branches", FailureKind::DivergentBranches),
];

fn is_match(pattern: &str, text: &str) -> bool {
    Regex::new(pattern).is_ok_and(|regex| regex.is_match(text))
}

/// Classifies a failed outcome by its stderr and stdout.
///
/// git writes "nothing to commit" to stdout, the rest to stderr.
#[must_use]
pub fn classify(outcome: &CommandOutcome) -> FailureKind {
    let text = format!("{}\n{}", outcome.stderr, outcome.stdout);
    PATTERNS
        .iter()
        .find(|(pattern, _)| is_match(pattern, &text))
        .map_or(FailureKind::Other, |&(_, kind)| kind)
}
