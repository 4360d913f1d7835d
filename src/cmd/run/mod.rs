// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Operation commands: run one operation and render its events.
//!
//! ```text
//! RepoArgs + Config --> RepositoryConfig
//!        |
//!        v
//! OperationExecutor::spawn_named --> ChannelSink --> flume rx
//!                                                      |
//!                     render each event (text or JSON) v
//!                     until Finished; --refresh then runs status
//! ```


use anyhow::Context;
use std::io::Write;
use std::sync::Arc;
use tracing::debug;

use crate::cli::repo::RepoArgs;
use crate::config::Config;
use crate::error::Result;
use crate::git::backend::GitBackend;
use crate::git::ops::Operation;
use crate::git::repository::RepositoryConfig;
use crate::worker::OperationExecutor;
use crate::worker::events::{ChannelSink, OperationResult, Severity, WorkerEvent};

/// How events are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Render {
    Text,
    Json,
}

impl Render {
    #[must_use]
    pub const fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }

    /// The line for `event`, or `None` when this mode does not show it.
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot be serialized.
    pub fn line(self, event: &WorkerEvent) -> Result<Option<String>> {
        if self == Self::Json {
            return Ok(Some(serde_json::to_string(event)?));
        }

        let line = match event {
            WorkerEvent::Progress(progress) => match progress.severity {
                Severity::Info => progress.message.clone(),
                severity => format!("{} {}", symbol(severity), progress.message),
            },
            // the status check already narrates these values
            WorkerEvent::Status(_) => return Ok(None),
            WorkerEvent::Finished(result) => {
                let severity = if result.success {
                    Severity::Success
                } else {
                    Severity::Error
                };
                format!("{} {}", symbol(severity), result.message)
            }
        };
        Ok(Some(line))
    }
}

const fn symbol(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "",
        Severity::Success => "✓",
        Severity::Warning => "⚠",
        Severity::Error => "✗",
    }
}

/// Runs the operation `name` and renders its events to stdout.
///
/// Returns the terminal result; with `--refresh`, a successful operation is
/// followed by a status check whose failure does not change the outcome.
///
/// # Errors
///
/// Returns an error if the repository cannot be resolved from the
/// configuration, git cannot be found, or stdout cannot be written.
pub async fn run_operation_command(
    name: &str,
    args: &RepoArgs,
    config: &Config,
) -> Result<OperationResult> {
    let repository = config.repository(args.profile.as_deref(), &args.overrides())?;
    let executor = OperationExecutor::new(config.git.backend()?);
    let render = Render::from_json_flag(args.json);
    let mut out = std::io::stdout();

    run_with_refresh(&executor, name, repository, args.refresh, render, &mut out).await
}

/// Runs `name`, then a status check when `refresh` is set and it succeeded.
///
/// # Errors
///
/// Returns an error if writing fails or the worker task is lost.
pub async fn run_with_refresh<B: GitBackend + 'static>(
    executor: &OperationExecutor<B>,
    name: &str,
    repository: RepositoryConfig,
    refresh: bool,
    render: Render,
    out: &mut dyn Write,
) -> Result<OperationResult> {
    let refresh_config = refresh.then(|| repository.clone());
    let result = run_and_render(executor, name, repository, render, out).await?;

    if result.success
        && let Some(repository) = refresh_config
    {
        debug!("refreshing status");
        run_and_render(
            executor,
            Operation::StatusCheck.as_str(),
            repository,
            render,
            out,
        )
        .await?;
    }
    Ok(result)
}

/// Spawns one operation and renders its events until the terminal result.
///
/// # Errors
///
/// Returns an error if writing fails or the worker task is lost.
pub async fn run_and_render<B: GitBackend + 'static>(
    executor: &OperationExecutor<B>,
    name: &str,
    repository: RepositoryConfig,
    render: Render,
    out: &mut dyn Write,
) -> Result<OperationResult> {
    let (sink, rx) = ChannelSink::channel();
    let handle = executor.spawn_named(name, repository, Arc::new(sink));

    while let Ok(event) = rx.recv_async().await {
        if let Some(line) = render.line(&event)? {
            writeln!(out, "{line}")?;
        }
        if event.is_finished() {
            break;
        }
    }
    out.flush()?;

    handle.await.context("worker task ended unexpectedly")
}
