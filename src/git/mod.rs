// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!            ops.rs (Operation, Recipes)
//!             |        |          |
//!             v        v          v
//!        classify   status    runner.rs (CommandRunner)
//!        expected   counts,      |  "▶ desc" progress
//!        failures   branch       v
//!                          backend (GitBackend trait)
//!                                |
//!                                v
//!                          ShellBackend --> git CLI
//! ```
//!
//! **`CommandRunner`** is the only path to a subprocess. Recipes never see
//! a process, only [`backend::CommandOutcome`]s.

pub mod backend;
pub mod classify;
pub mod ops;
pub mod repository;
pub mod runner;
pub mod status;

pub use backend::{CommandOutcome, GitBackend, ShellBackend};
pub use ops::{Operation, Recipes};
pub use repository::RepositoryConfig;
pub use runner::CommandRunner;

#[cfg(test)]
pub(crate) mod testing;
