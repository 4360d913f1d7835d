// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! encoding
//!   bytes_to_utf8()    UTF-8 / GBK --> UTF-8, never fails
//!   non_empty_lines()  line iterator used for porcelain counting
//! ```

pub mod encoding;
