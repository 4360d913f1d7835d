// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for gitsync-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! gitsync [global options] <command>
//! version
//! profiles
//! init | upload | download | sync | overwrite | delete | status  [repo args]
//! run <operation>  [repo args]
//! ```

pub mod global;
pub mod repo;


use crate::cli::global::GlobalOptions;
use crate::cli::repo::RepoArgs;
use crate::git::ops::Operation;
use clap::{Args, Parser, Subcommand};

/// Git Repository Sync Worker
///
/// Keeps a local directory and a remote git repository in step.
#[derive(Debug, Parser)]
#[command(
    name = "gitsync",
    author,
    version,
    about = "Git Repository Sync Worker",
    long_about = "gitsync-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Uploads, downloads, syncs, overwrites and cleans a git\n\
                  repository against its `origin` remote using the git CLI.\n\n\
                  `gitsync sync -p notes` syncs the `notes` profile from the\n\
                  configuration. `gitsync upload --path DIR --remote URL` works\n\
                  without any configuration file.",
    after_help = "CONFIGURATION:\n\n\
                  gitsync reads `gitsync.toml` from the current directory, then\n\
                  any --ini files in order, then GITSYNC_* environment variables\n\
                  (nested keys separated by `__`, e.g. GITSYNC_GIT__TIMEOUT_SECS).\n\
                  Use --no-default-config to skip `gitsync.toml`."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists configured profiles.
    Profiles,

    /// Initializes the repository and its `origin` remote.
    Init(RepoArgs),

    /// Commits all local changes and pushes them.
    Upload(RepoArgs),

    /// Fetches and pulls remote changes.
    Download(RepoArgs),

    /// Commits, rebases onto the remote, and pushes.
    Sync(RepoArgs),

    /// Force-pushes local state over the remote.
    Overwrite(RepoArgs),

    /// Removes every tracked file and pushes the removal.
    Delete(RepoArgs),

    /// Reports branch, uncommitted and unpushed changes.
    #[command(visible_alias = "status-check")]
    Status(RepoArgs),

    /// Runs an operation given by name.
    Run(RunArgs),
}

/// Arguments of `run`.
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Operation name, e.g. `sync` or `status-check`.
    pub operation: String,

    #[command(flatten)]
    pub repo: RepoArgs,
}

impl Command {
    /// The operation name and repository arguments, for operation commands.
    #[must_use]
    pub fn operation(&self) -> Option<(&str, &RepoArgs)> {
        let (operation, args) = match self {
            Self::Version | Self::Profiles => return None,
            Self::Run(run) => return Some((run.operation.as_str(), &run.repo)),
            Self::Init(args) => (Operation::Init, args),
            Self::Upload(args) => (Operation::Upload, args),
            Self::Download(args) => (Operation::Download, args),
            Self::Sync(args) => (Operation::Sync, args),
            Self::Overwrite(args) => (Operation::Overwrite, args),
            Self::Delete(args) => (Operation::Delete, args),
            Self::Status(args) => (Operation::StatusCheck, args),
        };
        Some((operation.as_str(), args))
    }
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}
