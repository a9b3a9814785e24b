// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::warn;

use qforge_cli::{commands, Cli, Command, CommandOutcome};
use qforge_config::{load_config_or_default, validate_config, QforgeConfig};
use qforge_observability::{init_logging, split_debug_args, LogFormat, LoggingOptions};

fn main() -> ExitCode {
    match run() {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<CommandOutcome> {
    let (debug_flags, args) = split_debug_args(std::env::args());
    let cli = Cli::parse_from(args);

    let overrides = cli.config_overrides();
    let config = load_config_or_default(cli.config.as_deref(), Some(&overrides))
        .context("Failed to load configuration")?;
    validate_config(&config)?;

    let _logging = init_logging(&logging_options(&config)?, &debug_flags)?;
    for name in debug_flags.unknown_crates() {
        warn!(target: "qforge-cli", "--debug-{} does not match any qforge crate", name);
    }

    let report = match &cli.command {
        Command::Search(args) => {
            commands::search(&config, args.weights_out.as_deref(), args.output.as_deref())?
        }
        Command::Verify(args) => commands::verify(&config, &args.weights)?,
        Command::Emit(args) => commands::emit(&config, &args.weights, args.output.as_deref())?,
    };

    print!("{}", report.stdout);
    Ok(report.outcome)
}

fn logging_options(config: &QforgeConfig) -> Result<LoggingOptions> {
    let logging = &config.logging;
    let format: LogFormat = logging.format.parse()?;
    let log_dir = if logging.log_dir.as_os_str().is_empty() {
        None
    } else {
        Some(logging.log_dir.clone())
    };
    Ok(LoggingOptions {
        level: logging.level.clone(),
        format,
        log_dir,
        keep_runs: logging.keep_runs,
    })
}
