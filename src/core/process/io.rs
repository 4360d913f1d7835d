// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Output capture for processes.
//!
//! ```text
//! run_child()
//!   stdout/stderr reader tasks (raw bytes to EOF)
//!   timeout( wait --> join readers )
//!     expired --> abort readers, kill --> ProcessError::Timeout
//!   decode each stream (UTF-8 / GBK / lossy)
//!   --> ProcessOutput { exit_code, stdout, stderr }
//! ```
//!
//! Streams are read as bytes and decoded once complete, so a multi-byte
//! GBK sequence is never split across a read boundary. A grandchild that
//! inherits a pipe keeps it open after the child exits, so the readers run
//! under the same deadline as the wait.

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use super::builder::{ProcessBuilder, ProcessOutput};
use crate::error::{ProcessError, SyncError, SyncResult};
use crate::utility::encoding::{bytes_to_utf8, non_empty_lines};

type ReaderHandle = JoinHandle<std::io::Result<Vec<u8>>>;

/// Spawns a task reading the stream to EOF.
fn spawn_reader<R>(stream: Option<R>) -> Option<ReaderHandle>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    stream.map(|mut stream| {
        tokio::spawn(async move {
            let mut buf = Vec::new();
            stream.read_to_end(&mut buf).await?;
            Ok(buf)
        })
    })
}

/// Waits for a reader and decodes what it collected.
async fn finish_reader(
    handle: Option<&mut ReaderHandle>,
    process_name: &str,
    stream_name: &str,
) -> String {
    let Some(handle) = handle else {
        return String::new();
    };

    let bytes = match handle.await {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(e)) => {
            warn!(process = %process_name, stream = %stream_name, error = %e, "error reading stream");
            return String::new();
        }
        Err(e) => {
            warn!(process = %process_name, stream = %stream_name, error = %e, "reader task failed");
            return String::new();
        }
    };

    let text = bytes_to_utf8(&bytes);
    for line in non_empty_lines(&text) {
        trace!(process = %process_name, stream = %stream_name, line = %line, "output");
    }
    text.into_owned()
}

impl ProcessBuilder {
    /// Runs the child process, collecting output and waiting for completion.
    pub(super) async fn run_child(
        &self,
        name: &str,
        cmd_line: &str,
        child: &mut Child,
    ) -> SyncResult<ProcessOutput> {
        let mut stdout_handle = spawn_reader(child.stdout.take());
        let mut stderr_handle = spawn_reader(child.stderr.take());

        let collect = async {
            let exit_status = child.wait().await.map_err(|e| ProcessError::OutputError {
                command: cmd_line.to_string(),
                message: e.to_string(),
            })?;
            let stdout = finish_reader(stdout_handle.as_mut(), name, "stdout").await;
            let stderr = finish_reader(stderr_handle.as_mut(), name, "stderr").await;
            Ok::<_, SyncError>(ProcessOutput::new(
                exit_status.code().unwrap_or(-1),
                stdout,
                stderr,
            ))
        };

        let Some(timeout_duration) = self.timeout_duration() else {
            return collect.await;
        };

        let outcome = tokio::time::timeout(timeout_duration, collect).await;
        if let Ok(output) = outcome {
            return output;
        }

        warn!(process = %name, timeout = ?timeout_duration, "process timed out");
        for handle in [&stdout_handle, &stderr_handle].into_iter().flatten() {
            handle.abort();
        }
        // the child itself may already have exited, leaving only a grandchild
        if let Err(e) = child.kill().await {
            debug!(process = %name, error = %e, "kill after timeout failed");
        }
        Err(ProcessError::Timeout {
            command: cmd_line.to_string(),
            timeout_secs: timeout_duration.as_secs(),
        }
        .into())
    }
}
