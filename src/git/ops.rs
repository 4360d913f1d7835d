// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Operation recipes.
//!
//! ```text
//! Init       .git? --no--> init, remote add, branch -M main
//!                  --yes-> get-url origin: same | set-url | remote add
//! Upload     [inline init] status: clean --> done
//!            add ., commit "Auto sync: ts", push (--> push -u)
//! Download   .git required. fetch, rev-list HEAD..origin/main
//!            n > 0 --> pull | 0 --> up to date | failed --> pull
//!            pull diverged --> warn (sync reconciles), fail
//! Sync       .git required. [add ., commit "Sync: ts"], fetch
//!            pull --rebase: ok | no remote ref --> skip
//!                         | else --> rebase --abort, pull --no-rebase
//!                                    failed --> merge --abort, Reconcile
//!            push (--> push -u)
//! Overwrite  [inline init] add ., commit (nothing to commit ok), push -f
//! Delete     .git required. rm -rf . (nothing tracked ok),
//!            commit --allow-empty "Clean repository", push
//! Status     .git required. branch, porcelain, rev-list @{u}..HEAD
//! ```
//!
//! Every recipe returns its terminal result instead of emitting it; the
//! executor emits exactly one.

use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::classify::{FailureKind, classify};
use super::repository::RepositoryConfig;
use super::runner::CommandRunner;
use super::status::{
    DEFAULT_BRANCH, REMOTE, branch_or_default, count_changes, is_repository, parse_count,
};
use crate::error::{GitError, PreconditionError, SyncError, SyncResult};
use crate::worker::events::{OperationResult, RepoStatus, Severity};

/// The closed set of operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Init,
    Upload,
    Download,
    Sync,
    Overwrite,
    Delete,
    StatusCheck,
}

impl Operation {
    pub const ALL: [Self; 7] = [
        Self::Init,
        Self::Upload,
        Self::Download,
        Self::Sync,
        Self::Overwrite,
        Self::Delete,
        Self::StatusCheck,
    ];

    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Upload => "upload",
            Self::Download => "download",
            Self::Sync => "sync",
            Self::Overwrite => "overwrite",
            Self::Delete => "delete",
            Self::StatusCheck => "status",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = SyncError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "init" => Ok(Self::Init),
            "upload" => Ok(Self::Upload),
            "download" => Ok(Self::Download),
            "sync" => Ok(Self::Sync),
            "overwrite" => Ok(Self::Overwrite),
            "delete" => Ok(Self::Delete),
            "status" | "status-check" | "status_check" => Ok(Self::StatusCheck),
            _ => Err(SyncError::unknown_operation(name)),
        }
    }
}

/// Local time in the commit message format.
fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// The seven recipes, bound to one repository and one event sink.
pub struct Recipes<'a> {
    runner: CommandRunner<'a>,
    config: &'a RepositoryConfig,
}

impl<'a> Recipes<'a> {
    pub const fn new(runner: CommandRunner<'a>, config: &'a RepositoryConfig) -> Self {
        Self { runner, config }
    }

    /// Runs the recipe for `operation`.
    ///
    /// # Errors
    ///
    /// Returns the first fatal step failure or violated precondition.
    pub async fn run(&self, operation: Operation) -> SyncResult<OperationResult> {
        match operation {
            Operation::Init => self.init().await,
            Operation::Upload => self.upload().await,
            Operation::Download => self.download().await,
            Operation::Sync => self.sync().await,
            Operation::Overwrite => self.overwrite().await,
            Operation::Delete => self.delete().await,
            Operation::StatusCheck => self.status().await,
        }
    }

    /// Sets the local commit identity, if configured. Never fails on a
    /// non-zero exit; does nothing outside a repository.
    ///
    /// # Errors
    ///
    /// Returns a process error if git cannot be run.
    pub async fn configure_identity(&self) -> SyncResult<()> {
        let Some((name, email)) = self.config.identity() else {
            return Ok(());
        };
        if !self.has_repository() {
            return Ok(());
        }
        self.runner
            .run_silent(&["config", "user.name", name])
            .await?;
        self.runner
            .run_silent(&["config", "user.email", email])
            .await?;
        Ok(())
    }

    fn has_repository(&self) -> bool {
        is_repository(self.runner.cwd())
    }

    fn require_repository(&self) -> SyncResult<()> {
        if self.has_repository() {
            return Ok(());
        }
        Err(PreconditionError::NotInitialized {
            path: self.runner.cwd().display().to_string(),
        }
        .into())
    }

    /// Creates or verifies the repository and its `origin` remote.
    async fn ensure_initialized(&self) -> SyncResult<()> {
        let url = self.config.remote_url();

        if !self.has_repository() {
            self.runner.run(&["init"], "initialize git repository").await?;
            self.configure_identity().await?;
            self.runner
                .run(&["remote", "add", REMOTE, url], "add remote repository")
                .await?;
            self.runner
                .run(&["branch", "-M", DEFAULT_BRANCH], "create main branch")
                .await?;
            self.runner
                .progress(Severity::Success, "repository initialized");
            return Ok(());
        }

        let current = self.runner.probe(&["remote", "get-url", REMOTE]).await?;
        if !current.success() {
            debug!(stderr = %current.stderr.trim(), "no origin remote");
            self.runner
                .run(&["remote", "add", REMOTE, url], "add remote repository")
                .await?;
            self.runner
                .progress(Severity::Success, "remote repository added");
        } else if current.stdout.trim() != url {
            self.runner
                .run(
                    &["remote", "set-url", REMOTE, url],
                    "update remote repository URL",
                )
                .await?;
            self.runner
                .progress(Severity::Success, "remote repository updated");
        } else {
            self.runner.progress(
                Severity::Success,
                "repository exists and is configured correctly",
            );
        }
        Ok(())
    }

    /// Pushes `main`, retrying once with `-u` for a first push.
    async fn push_with_upstream(&self) -> SyncResult<()> {
        let outcome = self
            .runner
            .attempt(&["push", REMOTE, DEFAULT_BRANCH], "push to remote repository")
            .await?;
        if outcome.success() {
            return Ok(());
        }

        debug!(stderr = %outcome.stderr.trim(), "push failed, retrying with upstream");
        self.runner
            .run(
                &["push", "-u", REMOTE, DEFAULT_BRANCH],
                "first push to remote repository",
            )
            .await?;
        Ok(())
    }

    async fn changed_paths(&self) -> SyncResult<usize> {
        let porcelain = self.runner.run_silent(&["status", "--porcelain"]).await?;
        Ok(count_changes(&porcelain))
    }

    async fn init(&self) -> SyncResult<OperationResult> {
        self.runner
            .progress(Severity::Info, "initializing git repository...");
        self.ensure_initialized().await?;
        Ok(OperationResult::success("repository initialized and verified"))
    }

    async fn upload(&self) -> SyncResult<OperationResult> {
        self.runner
            .progress(Severity::Info, "analyzing local changes...");

        if !self.has_repository() {
            self.ensure_initialized().await?;
        }

        let changes = self.changed_paths().await?;
        if changes == 0 {
            return Ok(OperationResult::success(
                "working tree clean, nothing to upload",
            ));
        }
        self.runner.progress(
            Severity::Info,
            format!("detected {changes} changed file(s)"),
        );

        self.runner.run(&["add", "."], "stage files").await?;
        let message = format!("Auto sync: {}", timestamp());
        self.runner
            .run(&["commit", "-m", message.as_str()], "commit changes")
            .await?;
        self.push_with_upstream().await?;

        Ok(OperationResult::success(format!(
            "upload complete, {changes} file(s) synced to remote"
        )))
    }

    async fn download(&self) -> SyncResult<OperationResult> {
        self.runner
            .progress(Severity::Info, "checking remote for updates...");
        self.require_repository()?;

        self.runner
            .run(&["fetch", REMOTE], "fetch remote updates")
            .await?;

        let behind = self
            .runner
            .probe(&["rev-list", "HEAD..origin/main", "--count"])
            .await?;

        if behind.success() {
            return match parse_count(&behind) {
                Some(count) if count > 0 => {
                    self.runner.progress(
                        Severity::Info,
                        format!("found {count} new remote commit(s)"),
                    );
                    self.pull_remote().await?;
                    Ok(OperationResult::success(format!(
                        "download complete, {count} commit(s) updated"
                    )))
                }
                _ => Ok(OperationResult::success("already up to date")),
            };
        }

        // HEAD or origin/main does not exist yet
        debug!(stderr = %behind.stderr.trim(), "behind count unavailable, pulling directly");
        self.pull_remote().await?;
        Ok(OperationResult::success(
            "download complete, local repository updated",
        ))
    }

    /// Plain pull for Download. Diverged history is left to Sync.
    async fn pull_remote(&self) -> SyncResult<()> {
        let description = "pull remote updates";
        let pull = self
            .runner
            .attempt(&["pull", REMOTE, DEFAULT_BRANCH], description)
            .await?;
        if pull.success() {
            return Ok(());
        }

        if classify(&pull) == FailureKind::DivergentBranches {
            self.runner.progress(
                Severity::Warning,
                "local commits diverge from remote, run sync to reconcile them",
            );
        }
        Err(CommandRunner::failure(description, &pull))
    }

    async fn sync(&self) -> SyncResult<OperationResult> {
        self.runner
            .progress(Severity::Info, "running two-way sync...");
        self.require_repository()?;

        if self.changed_paths().await? > 0 {
            self.runner
                .progress(Severity::Info, "saving local changes...");
            self.runner.run(&["add", "."], "stage local changes").await?;
            let message = format!("Sync: {}", timestamp());
            self.runner
                .run(&["commit", "-m", message.as_str()], "commit local changes")
                .await?;
        }

        self.runner
            .progress(Severity::Info, "pulling remote updates...");
        self.runner
            .run(&["fetch", REMOTE], "fetch remote information")
            .await?;
        self.reconcile().await?;

        self.runner
            .progress(Severity::Info, "pushing to remote repository...");
        self.push_with_upstream().await?;

        Ok(OperationResult::success(
            "sync complete, local and remote are consistent",
        ))
    }

    /// Brings in remote commits: rebase first, merge as the fallback.
    async fn reconcile(&self) -> SyncResult<()> {
        let rebase = self
            .runner
            .attempt(
                &["pull", REMOTE, DEFAULT_BRANCH, "--rebase"],
                "merge remote changes (rebase)",
            )
            .await?;
        if rebase.success() {
            return Ok(());
        }

        if classify(&rebase) == FailureKind::MissingRemoteRef {
            self.runner.progress(
                Severity::Warning,
                "remote branch main does not exist yet, nothing to pull",
            );
            return Ok(());
        }

        debug!(stderr = %rebase.stderr.trim(), "rebase failed, falling back to merge");
        self.runner.run_silent(&["rebase", "--abort"]).await?;
        self.runner.progress(
            Severity::Warning,
            "rebase failed, falling back to merge",
        );

        let merge = self
            .runner
            .attempt(
                &["pull", "--no-rebase", REMOTE, DEFAULT_BRANCH],
                "merge remote changes",
            )
            .await?;
        if merge.success() {
            return Ok(());
        }

        self.runner.run_silent(&["merge", "--abort"]).await?;
        Err(GitError::Reconcile {
            message: merge.diagnostic(),
        }
        .into())
    }

    async fn overwrite(&self) -> SyncResult<OperationResult> {
        self.runner
            .progress(Severity::Warning, "force overwriting remote repository...");

        if !self.has_repository() {
            self.ensure_initialized().await?;
        }

        self.runner.run(&["add", "."], "stage all files").await?;

        let message = format!("Force overwrite: {}", timestamp());
        let commit = self
            .runner
            .attempt(&["commit", "-m", message.as_str()], "commit changes")
            .await?;
        if !commit.success() {
            if classify(&commit) != FailureKind::NothingToCommit {
                return Err(CommandRunner::failure("commit changes", &commit));
            }
            self.runner
                .progress(Severity::Info, "nothing new to commit");
        }

        self.runner
            .run(&["push", "-f", REMOTE, DEFAULT_BRANCH], "force push")
            .await?;

        Ok(OperationResult::success(
            "overwrite complete, remote replaced by local",
        ))
    }

    async fn delete(&self) -> SyncResult<OperationResult> {
        self.runner
            .progress(Severity::Warning, "cleaning remote repository...");
        self.require_repository()?;

        let removal = self
            .runner
            .attempt(&["rm", "-rf", "."], "remove all files")
            .await?;
        if !removal.success() {
            if classify(&removal) != FailureKind::NoMatchingFiles {
                return Err(CommandRunner::failure("remove all files", &removal));
            }
            self.runner
                .progress(Severity::Info, "no tracked files to remove");
        }

        self.runner
            .run(
                &["commit", "--allow-empty", "-m", "Clean repository"],
                "commit removal",
            )
            .await?;
        self.runner
            .run(&["push", REMOTE, DEFAULT_BRANCH], "push removal")
            .await?;

        Ok(OperationResult::success("delete complete, remote cleaned"))
    }

    async fn status(&self) -> SyncResult<OperationResult> {
        if !self.has_repository() {
            return Err(PreconditionError::NotARepository {
                path: self.runner.cwd().display().to_string(),
            }
            .into());
        }

        let branch = branch_or_default(
            &self.runner.run_silent(&["branch", "--show-current"]).await?,
        );
        self.runner
            .progress(Severity::Info, format!("current branch: {branch}"));

        let uncommitted = self.changed_paths().await?;
        if uncommitted > 0 {
            self.runner.progress(
                Severity::Warning,
                format!("uncommitted changes: {uncommitted} file(s)"),
            );
        } else {
            self.runner
                .progress(Severity::Success, "working tree clean");
        }

        let ahead = self
            .runner
            .probe(&["rev-list", "@{u}..HEAD", "--count"])
            .await?;
        let status = RepoStatus {
            branch,
            uncommitted,
            unpushed: parse_count(&ahead),
        };
        self.runner.progress(
            Severity::Info,
            format!(
                "unpushed commits: {} ({})",
                status.unpushed_display(),
                status.sync_state()
            ),
        );
        self.runner.report_status(status);

        Ok(OperationResult::success("status check complete"))
    }
}
