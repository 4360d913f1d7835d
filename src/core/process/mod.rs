// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning and management.
//!
//! ```text
//! ProcessBuilder::new("git")
//!   .args() .cwd() .env() .timeout()
//!   .run()
//!       --> tokio::process::Command (argument vector, no shell)
//!           read stdout/stderr as bytes, decode tolerantly
//!           timeout covers the wait and both pipes
//!           Windows: no console window
//!       --> ProcessOutput { exit_code, stdout, stderr }
//! ```

pub mod builder;
mod io;
mod runner;
