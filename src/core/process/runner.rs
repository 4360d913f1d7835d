// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution and lifecycle management.
//!
//! ```text
//! run()
//!   |
//!   v
//! build_command()   args, cwd, extra env, stdio, kill_on_drop
//!   |
//!   v
//! spawn() --err--> ProcessError::SpawnFailed / ExecutableNotFound
//!   |
//!   v
//! run_child()       wait + readers, all under the timeout
//!   |
//!   v
//! ProcessOutput { exit_code, stdout, stderr }   (any exit code)
//! ```

use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, trace};

use super::builder::{ProcessBuilder, ProcessOutput};
#[cfg(windows)]
use super::builder::ProcessFlags;
use crate::error::{ProcessError, SyncResult};

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

impl ProcessBuilder {
    /// Returns the display name for this process.
    pub(super) fn display_name(&self) -> String {
        self.name_override().map_or_else(
            || {
                self.program().file_stem().map_or_else(
                    || "process".to_string(),
                    |s| s.to_string_lossy().into_owned(),
                )
            },
            String::from,
        )
    }

    /// Returns the full command line as a string (for logging).
    #[must_use]
    pub fn command_line(&self) -> String {
        use std::fmt::Write as _;

        let mut cmd = self.program().display().to_string();
        for arg in self.args_slice() {
            if arg.is_empty() || arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    /// Spawns and runs the process, waiting for completion.
    ///
    /// # Errors
    ///
    /// Returns a [`ProcessError`] if the executable does not exist or cannot
    /// be spawned, or if the timeout expires (the child is killed first).
    /// A non-zero exit is returned as a normal [`ProcessOutput`].
    pub async fn run(self) -> SyncResult<ProcessOutput> {
        let name = self.display_name();
        let cmd_line = self.command_line();

        if let Some(cwd) = self.working_dir() {
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %cmd_line, "exec");

        let mut command = self.build_command();
        let mut child = command.spawn().map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound && self.working_dir_exists() {
                ProcessError::ExecutableNotFound {
                    name: self.program().display().to_string(),
                }
            } else {
                ProcessError::SpawnFailed {
                    command: cmd_line.clone(),
                    source,
                }
            }
        })?;

        trace!(process = %name, pid = ?child.id(), "spawned");

        let output = self.run_child(&name, &cmd_line, &mut child).await?;

        trace!(process = %name, exit_code = output.exit_code(), "completed");
        Ok(output)
    }

    /// Builds the tokio Command from this builder's configuration.
    fn build_command(&self) -> Command {
        let mut command = Command::new(self.program());

        command.args(self.args_slice());

        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }

        for (key, value) in self.environment() {
            command.env(key, value);
        }

        command.stdin(Stdio::null());
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());

        command.kill_on_drop(true);

        #[cfg(windows)]
        if self.process_flags().contains(ProcessFlags::HIDE_WINDOW) {
            command.creation_flags(CREATE_NO_WINDOW);
        }

        command
    }

    /// A missing working directory also reports `NotFound` on spawn.
    fn working_dir_exists(&self) -> bool {
        self.working_dir().is_none_or(|dir| dir.is_dir())
    }
}
