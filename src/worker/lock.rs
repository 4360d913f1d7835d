// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-repository exclusion.
//!
//! ```text
//! try_acquire(path) --held?--> SyncError::Busy
//!        |
//!        v
//!   RepoGuard ---drop---> path released
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{SyncError, SyncResult};

/// Set of repository paths with an operation in flight.
///
/// Keys are canonical paths so `./repo` and `/abs/repo` collide.
#[derive(Debug, Clone, Default)]
pub struct RepoLocks {
    held: Arc<Mutex<BTreeSet<PathBuf>>>,
}

impl RepoLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `path` for the lifetime of the returned guard.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Busy` if another operation holds the path.
    pub fn try_acquire(&self, path: &Path) -> SyncResult<RepoGuard> {
        let mut held = self.held.lock().unwrap_or_else(PoisonError::into_inner);
        if !held.insert(path.to_path_buf()) {
            return Err(SyncError::busy(path));
        }
        Ok(RepoGuard {
            locks: self.clone(),
            path: path.to_path_buf(),
        })
    }

    /// True while an operation holds `path`.
    #[must_use]
    pub fn is_held(&self, path: &Path) -> bool {
        self.held
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(path)
    }
}

/// Releases its repository path on drop.
#[derive(Debug)]
pub struct RepoGuard {
    locks: RepoLocks,
    path: PathBuf,
}

impl Drop for RepoGuard {
    fn drop(&mut self) {
        self.locks
            .held
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.path);
    }
}
