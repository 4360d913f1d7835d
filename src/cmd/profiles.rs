// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Profiles command implementation.

use crate::config::Config;

/// Lists the configured profiles.
pub fn run_profiles_command(config: &Config) {
    if config.profiles.is_empty() {
        println!("No profiles configured");
        return;
    }
    for line in config.format_profiles() {
        println!("{line}");
    }
}
