// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Background execution of operations.
//!
//! ```text
//! spawn(op, config, sink) ---> tokio task
//!                                |
//!                                v
//!                      create_dir_all(local_path)
//!                      lock canonical path --held--> Busy
//!                      configure identity
//!                      Recipes::run(op)
//!                                |
//!          Ok(result) / Err(e) / panic   (single failure boundary)
//!                                |
//!                                v
//!                      sink.on_result(..)  exactly once
//! ```
//!
//! Progress events are emitted by the recipe as it goes; the executor
//! only adds the terminal result.

pub mod events;
mod lock;


use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::error::SyncResult;
use crate::git::backend::{GitBackend, ShellBackend};
use crate::git::ops::{Operation, Recipes};
use crate::git::repository::RepositoryConfig;
use crate::git::runner::CommandRunner;
use events::{EventSink, OperationResult};
pub use lock::{RepoGuard, RepoLocks};

/// Runs operations off the caller's task and reports through an [`EventSink`].
///
/// Cloning is cheap; clones share the backend and the repository locks.
pub struct OperationExecutor<B = ShellBackend> {
    backend: Arc<B>,
    locks: RepoLocks,
}

impl<B> Clone for OperationExecutor<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            locks: self.locks.clone(),
        }
    }
}

impl<B: GitBackend + 'static> OperationExecutor<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
            locks: RepoLocks::new(),
        }
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Repositories with an operation in flight.
    #[must_use]
    pub const fn locks(&self) -> &RepoLocks {
        &self.locks
    }

    /// Starts `operation` on a background task.
    ///
    /// The returned handle resolves to the same result the sink receives;
    /// awaiting it is optional.
    pub fn spawn(
        &self,
        operation: Operation,
        config: RepositoryConfig,
        sink: Arc<dyn EventSink>,
    ) -> JoinHandle<OperationResult> {
        let executor = self.clone();
        tokio::spawn(async move { executor.execute(operation, &config, sink.as_ref()).await })
    }

    /// Starts the operation called `name`. An unknown name still produces
    /// exactly one failure result, from the background task.
    pub fn spawn_named(
        &self,
        name: &str,
        config: RepositoryConfig,
        sink: Arc<dyn EventSink>,
    ) -> JoinHandle<OperationResult> {
        match name.parse::<Operation>() {
            Ok(operation) => self.spawn(operation, config, sink),
            Err(err) => tokio::spawn(async move {
                warn!(error = %err, "rejected operation");
                let result = OperationResult::failure(format!("operation failed: {err}"));
                sink.on_result(result.clone());
                result
            }),
        }
    }

    /// Runs `operation` to completion on the current task.
    ///
    /// Never fails: every error and panic becomes a failure result, which is
    /// emitted to `sink` exactly once and returned.
    pub async fn execute(
        &self,
        operation: Operation,
        config: &RepositoryConfig,
        sink: &dyn EventSink,
    ) -> OperationResult {
        let path = config.local_path().display().to_string();
        info!(operation = %operation, path = %path, "operation started");

        let outcome = AssertUnwindSafe(self.drive(operation, config, sink))
            .catch_unwind()
            .await;

        let result = match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(err)) => {
                warn!(operation = %operation, path = %path, error = %err, "operation failed");
                OperationResult::failure(format!("operation failed: {err}"))
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!(operation = %operation, path = %path, panic = %message, "operation panicked");
                OperationResult::failure(format!("operation failed: {message}"))
            }
        };

        info!(
            operation = %operation,
            path = %path,
            success = result.success,
            "operation finished"
        );
        sink.on_result(result.clone());
        result
    }

    async fn drive(
        &self,
        operation: Operation,
        config: &RepositoryConfig,
        sink: &dyn EventSink,
    ) -> SyncResult<OperationResult> {
        let local_path = config.local_path();
        tokio::fs::create_dir_all(local_path).await?;
        let canonical = tokio::fs::canonicalize(local_path).await?;
        let _guard = self.locks.try_acquire(&canonical)?;

        let runner = CommandRunner::new(self.backend.as_ref(), local_path, sink);
        let recipes = Recipes::new(runner, config);
        recipes.configure_identity().await?;
        recipes.run(operation).await
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "worker panicked".to_string())
}
