// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Version | Profiles | <operation>
//! ```

use std::process::ExitCode;

use gitsync_rs::cli::{self, Command};
use gitsync_rs::cmd::profiles::run_profiles_command;
use gitsync_rs::cmd::run::run_operation_command;
use gitsync_rs::config::Config;
use gitsync_rs::logging::{LogConfig, LogGuard, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    if matches!(cli.command, Some(Command::Version)) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let config = match cli.global.config_loader().and_then(|loader| loader.build()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match start_logging(&config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, &config).await
}

fn start_logging(config: &Config) -> gitsync_rs::error::Result<LogGuard> {
    let global = &config.global;
    let log_config = LogConfig::builder()
        .with_console_level(global.output_log_level)
        .with_file_level(global.file_log_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .with_json_file(global.log_json)
        .build();
    init_logging(&log_config)
}

async fn dispatch_command(cli: &cli::Cli, config: &Config) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => Ok(true),
        Some(Command::Profiles) => {
            run_profiles_command(config);
            Ok(true)
        }
        Some(command) => match command.operation() {
            Some((name, args)) => run_operation_command(name, args, config)
                .await
                .map(|result| result.success),
            None => Ok(true),
        },
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        // the failure was already rendered
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
