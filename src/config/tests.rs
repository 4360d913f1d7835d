// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::merge::ProfileOverride;
use super::types::GitConfig;
use super::{Config, ConfigLoader, ENV_PREFIX};
use crate::error::{ConfigError, SyncError};
use crate::logging::LogLevel;

const NOTES: &str = r#"
[global]
output_log_level = 3

[git]
timeout_secs = 30

[profiles.notes]
local_path = "/srv/notes"
remote_url = "https://example.com/me/notes.git"
user_name = "Me"
user_email = "me@example.com"

[profiles.scratch]
local_path = "/srv/scratch"
remote_url = "https://example.com/me/scratch.git"
"#;

fn config_error(err: &SyncError) -> &ConfigError {
    match err {
        SyncError::Config(inner) => inner,
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.global.output_log_level, LogLevel::WARN);
    assert_eq!(config.global.file_log_level, LogLevel::DEBUG);
    assert_eq!(config.global.log_file, None);
    assert_eq!(config.git.binary, "git");
    assert_eq!(config.git.timeout(), Some(Duration::from_secs(600)));
    assert!(config.profiles.is_empty());
}

#[test]
fn test_git_timeout_zero_disables() {
    let git = GitConfig {
        timeout_secs: 0,
        ..GitConfig::default()
    };
    assert_eq!(git.timeout(), None);
}

#[test]
fn test_config_parse() {
    let config = Config::parse(NOTES).unwrap();
    assert_eq!(config.global.output_log_level, LogLevel::INFO);
    assert_eq!(config.git.timeout(), Some(Duration::from_secs(30)));
    assert_eq!(
        config.profiles.keys().collect::<Vec<_>>(),
        ["notes", "scratch"]
    );

    let notes = config.profile("notes").unwrap();
    assert_eq!(notes.local_path, PathBuf::from("/srv/notes"));
    assert_eq!(notes.user_name.as_deref(), Some("Me"));
}

#[test]
fn test_config_rejects_out_of_range_log_level() {
    let err = Config::parse("[global]\noutput_log_level = 9").unwrap_err();
    assert!(
        err.to_string().contains("log level must be 0-5, got 9"),
        "{err:#}"
    );
}

#[test]
fn test_config_rejects_unknown_keys() {
    assert!(Config::parse("[git]\nbinary = \"git\"\nshallow = true").is_err());
}

#[test]
fn test_profile_missing_remote() {
    let err = Config::parse("[profiles.broken]\nlocal_path = \"/srv/broken\"").unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"config error: missing required config key 'remote_url' in section '[profiles.broken]'"
    );
}

#[test]
fn test_empty_git_binary_rejected() {
    let err = Config::parse("[git]\nbinary = \" \"").unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"config error: invalid value for 'binary' in section '[git]': must not be empty"
    );
}

#[test]
fn test_repository_from_profile() {
    let config = Config::parse(NOTES).unwrap();
    let repo = config
        .repository(Some("notes"), &ProfileOverride::default())
        .unwrap();

    assert_eq!(repo.local_path(), Path::new("/srv/notes"));
    assert_eq!(repo.remote_url(), "https://example.com/me/notes.git");
    assert_eq!(repo.identity(), Some(("Me", "me@example.com")));
}

#[test]
fn test_repository_overrides_win() {
    let config = Config::parse(NOTES).unwrap();
    let overrides = ProfileOverride {
        remote_url: Some("https://example.com/mirror.git".to_string()),
        user_email: Some("other@example.com".to_string()),
        ..ProfileOverride::default()
    };
    let repo = config.repository(Some("notes"), &overrides).unwrap();

    assert_eq!(repo.local_path(), Path::new("/srv/notes"));
    assert_eq!(repo.remote_url(), "https://example.com/mirror.git");
    assert_eq!(repo.identity(), Some(("Me", "other@example.com")));
}

#[test]
fn test_repository_without_profile() {
    let overrides = ProfileOverride {
        local_path: Some(PathBuf::from("/tmp/repo")),
        remote_url: Some(" https://example.com/repo.git ".to_string()),
        ..ProfileOverride::default()
    };
    let repo = Config::default().repository(None, &overrides).unwrap();

    assert_eq!(repo.remote_url(), "https://example.com/repo.git");
    assert_eq!(repo.identity(), None);
}

#[test]
fn test_repository_without_profile_needs_path() {
    let overrides = ProfileOverride {
        remote_url: Some("https://example.com/repo.git".to_string()),
        ..ProfileOverride::default()
    };
    let err = Config::default().repository(None, &overrides).unwrap_err();
    assert!(matches!(
        config_error(&err),
        ConfigError::MissingKey { key, .. } if key == "local_path"
    ));
}

#[test]
fn test_unknown_profile() {
    let err = Config::default()
        .repository(Some("nope"), &ProfileOverride::default())
        .unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"config error: profile 'nope' not found");
}

#[test]
fn test_profile_override_is_empty() {
    assert!(ProfileOverride::default().is_empty());
    let overrides = ProfileOverride {
        user_name: Some("Me".to_string()),
        ..ProfileOverride::default()
    };
    assert!(!overrides.is_empty());
}

#[test]
fn test_env_vars_override_files() {
    let vars = HashMap::from([
        ("GITSYNC_GIT__TIMEOUT_SECS".to_string(), "5".to_string()),
        (
            "GITSYNC_PROFILES__NOTES__REMOTE_URL".to_string(),
            "https://example.com/env.git".to_string(),
        ),
    ]);
    let config = ConfigLoader::new()
        .add_toml_str(NOTES)
        .with_env_prefix(ENV_PREFIX)
        .with_env_vars(vars)
        .build()
        .unwrap();

    assert_eq!(config.git.timeout_secs, 5);
    assert_eq!(
        config.profile("notes").unwrap().remote_url,
        "https://example.com/env.git"
    );
}

#[test]
fn test_set_overrides_everything() {
    let config = ConfigLoader::new()
        .add_toml_str(NOTES)
        .set("global.output_log_level", 5)
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(config.global.output_log_level, LogLevel::TRACE);
}

#[test]
fn test_later_files_win() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.toml");
    let second = dir.path().join("second.toml");
    std::fs::write(&first, "[git]\ntimeout_secs = 10\nbinary = \"git\"").unwrap();
    std::fs::write(&second, "[git]\ntimeout_secs = 20").unwrap();

    let loader = ConfigLoader::new()
        .add_toml_file(&first)
        .add_toml_file(&second);
    assert_eq!(loader.loaded_files(), [first.clone(), second.clone()]);

    let config = loader.build().unwrap();
    assert_eq!(config.git.timeout_secs, 20);
}

#[test]
fn test_optional_file_only_tracked_when_present() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("gitsync.toml");

    let loader = ConfigLoader::new().add_toml_file_optional(&missing);
    assert!(loader.loaded_files().is_empty());
    assert!(loader.build().is_ok());
}

#[test]
fn test_required_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Config::from_file(dir.path().join("absent.toml")).is_err());
}

#[test]
fn test_format_profiles() {
    let config = Config::parse(NOTES).unwrap();
    insta::assert_snapshot!(config.format_profiles().join("\n"), @r"
    notes    /srv/notes -> https://example.com/me/notes.git
    scratch  /srv/scratch -> https://example.com/me/scratch.git
    ");
}
