// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Events published by a running operation.
//!
//! ```text
//! executor task ---> EventSink
//!                      on_progress(ProgressEvent)   0..n, in step order
//!                      on_status(RepoStatus)        status check only
//!                      on_result(OperationResult)   exactly once, last
//!
//! ChannelSink: EventSink --> flume::Sender<WorkerEvent>
//! ```

use serde::Serialize;
use tracing::trace;

/// Severity of a progress message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// One observational progress message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressEvent {
    pub message: String,
    pub severity: Severity,
}

impl ProgressEvent {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}

/// Terminal outcome of one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationResult {
    pub success: bool,
    pub message: String,
}

impl OperationResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Snapshot of a repository reported by a status check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoStatus {
    /// Current branch, `main` when detached or unborn.
    pub branch: String,
    /// Non-empty lines of `git status --porcelain`.
    pub uncommitted: usize,
    /// Commits ahead of the upstream; `None` when there is no upstream.
    pub unpushed: Option<u32>,
}

impl RepoStatus {
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.uncommitted == 0
    }

    /// "connected" when an upstream is configured, "local only" otherwise.
    #[must_use]
    pub const fn sync_state(&self) -> &'static str {
        if self.unpushed.is_some() {
            "connected"
        } else {
            "local only"
        }
    }

    /// The unpushed count, or `--` when it is unavailable.
    #[must_use]
    pub fn unpushed_display(&self) -> String {
        self.unpushed
            .map_or_else(|| "--".to_string(), |count| count.to_string())
    }
}

/// Any event, for sinks that forward everything through one channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WorkerEvent {
    Progress(ProgressEvent),
    Status(RepoStatus),
    Finished(OperationResult),
}

impl WorkerEvent {
    /// True for the terminal event.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Finished(_))
    }
}

/// Receiver of operation events.
///
/// Called from the worker task; implementations must not block for long.
pub trait EventSink: Send + Sync {
    fn on_progress(&self, event: ProgressEvent);

    fn on_status(&self, _status: RepoStatus) {}

    fn on_result(&self, result: OperationResult);
}

/// Sink forwarding every event into a flume channel.
///
/// Sending never blocks. Events sent after the receiver is gone are dropped.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: flume::Sender<WorkerEvent>,
}

impl ChannelSink {
    #[must_use]
    pub const fn new(tx: flume::Sender<WorkerEvent>) -> Self {
        Self { tx }
    }

    /// Creates a sink and the unbounded receiver that drains it.
    #[must_use]
    pub fn channel() -> (Self, flume::Receiver<WorkerEvent>) {
        let (tx, rx) = flume::unbounded();
        (Self::new(tx), rx)
    }

    fn send(&self, event: WorkerEvent) {
        if self.tx.send(event).is_err() {
            trace!("event receiver dropped");
        }
    }
}

impl EventSink for ChannelSink {
    fn on_progress(&self, event: ProgressEvent) {
        self.send(WorkerEvent::Progress(event));
    }

    fn on_status(&self, status: RepoStatus) {
        self.send(WorkerEvent::Status(status));
    }

    fn on_result(&self, result: OperationResult) {
        self.send(WorkerEvent::Finished(result));
    }
}
