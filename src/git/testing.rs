// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scripted backend for driving recipes without git.

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use super::backend::{CommandOutcome, GitBackend};
use crate::error::{ProcessError, SyncResult};
use crate::worker::events::WorkerEvent;

#[derive(Debug, Clone)]
enum Response {
    Outcome(CommandOutcome),
    Timeout,
    Panic,
}

/// Answers git invocations from a script and records every call.
///
/// Calls not matched by a rule succeed with empty output. A successful
/// `init` creates `<cwd>/.git`, so recipes see the repository appear.
#[derive(Debug, Default)]
pub(crate) struct ScriptedBackend {
    rules: Mutex<Vec<(String, Response)>>,
    fail_at: Mutex<Option<(usize, bool)>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn rule(self, prefix: &str, response: Response) -> Self {
        self.rules
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((prefix.to_string(), response));
        self
    }

    /// Calls whose joined arguments start with `prefix` get `outcome`.
    /// Earlier rules win.
    pub(crate) fn on(self, prefix: &str, outcome: CommandOutcome) -> Self {
        self.rule(prefix, Response::Outcome(outcome))
    }

    /// Calls matching `prefix` succeed with `stdout`.
    pub(crate) fn stdout(self, prefix: &str, stdout: &str) -> Self {
        self.on(prefix, CommandOutcome::ok(stdout))
    }

    /// Calls matching `prefix` exit 1 with `stderr`.
    pub(crate) fn fails(self, prefix: &str, stderr: &str) -> Self {
        self.on(prefix, CommandOutcome::failed(1, stderr))
    }

    pub(crate) fn times_out(self, prefix: &str) -> Self {
        self.rule(prefix, Response::Timeout)
    }

    pub(crate) fn panics(self, prefix: &str) -> Self {
        self.rule(prefix, Response::Panic)
    }

    /// The `index`-th call (0-based) fails; as a timeout when `as_error`.
    pub(crate) fn fail_call(self, index: usize, as_error: bool) -> Self {
        *self.fail_at.lock().unwrap_or_else(PoisonError::into_inner) = Some((index, as_error));
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// True if some call started with `prefix`.
    pub(crate) fn issued(&self, prefix: &str) -> bool {
        self.calls().iter().any(|call| call.starts_with(prefix))
    }

    fn respond(&self, call: &str) -> Response {
        let index = {
            let mut calls = self.calls.lock().unwrap_or_else(PoisonError::into_inner);
            calls.push(call.to_string());
            calls.len() - 1
        };

        let injected = *self.fail_at.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((at, as_error)) = injected
            && at == index
        {
            return if as_error {
                Response::Timeout
            } else {
                Response::Outcome(CommandOutcome::failed(1, "fatal: injected failure"))
            };
        }

        self.rules
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|(prefix, _)| call.starts_with(prefix.as_str()))
            .map_or_else(
                || Response::Outcome(CommandOutcome::ok("")),
                |(_, response)| response.clone(),
            )
    }
}

impl GitBackend for ScriptedBackend {
    fn exec<'a>(
        &'a self,
        args: &'a [&'a str],
        cwd: &'a Path,
    ) -> BoxFuture<'a, SyncResult<CommandOutcome>> {
        async move {
            let call = args.join(" ");
            match self.respond(&call) {
                Response::Outcome(outcome) => {
                    if call == "init" && outcome.success() {
                        std::fs::create_dir_all(cwd.join(".git"))?;
                    }
                    Ok(outcome)
                }
                Response::Timeout => Err(ProcessError::Timeout {
                    command: format!("git {call}"),
                    timeout_secs: 1,
                }
                .into()),
                Response::Panic => panic!("scripted panic on '{call}'"),
            }
        }
        .boxed()
    }
}

/// Drains every event currently queued on a channel sink.
pub(crate) fn drain(rx: &flume::Receiver<WorkerEvent>) -> Vec<WorkerEvent> {
    rx.drain().collect()
}

/// Messages of the progress events among `events`.
pub(crate) fn progress_messages(events: &[WorkerEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            WorkerEvent::Progress(progress) => Some(progress.message.clone()),
            _ => None,
        })
        .collect()
}
