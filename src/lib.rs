// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |              render events
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered profiles  |
//!              '-------------+-------------'
//!                            v
//!              ,---------------------------,
//!              |          worker           |
//!              |  executor, locks, events  |
//!              '-------------+-------------'
//!                            v
//!                           git
//!                 recipes --> runner --> backend
//!
//!   +-----------------------------------------+
//!   |  core   process (spawn, timeout, decode)|
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod git;
pub mod logging;
pub mod utility;
pub mod worker;
