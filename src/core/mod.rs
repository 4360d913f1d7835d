// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for process management.
//!
//! ```text
//!     core
//!      |
//!      v
//!   process
//!      |
//!   Builder --> run() --> ProcessOutput
//!   flags, timeout, tolerant decoding
//! ```

pub mod process;
