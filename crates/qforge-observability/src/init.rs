// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization
//!
//! Console output goes to stderr so that generated tables on stdout stay
//! clean. With a log directory configured, each run also writes JSON lines
//! to a timestamped folder:
//! ```text
//! ./logs/
//!   └── run_20250101_120000/
//!       └── qforge.log
//! ```

use anyhow::{Context, Result};
use chrono::{NaiveDateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::config::{LogFormat, LoggingOptions};

const RUN_PREFIX: &str = "run_";
const RUN_TIMESTAMP: &str = "%Y%m%d_%H%M%S";

/// Keeps the file writer alive; logs are flushed when this is dropped
pub struct LoggingGuard {
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
    run_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Folder of this run's log file, if file logging is on
    pub fn run_dir(&self) -> Option<&Path> {
        self.run_dir.as_deref()
    }
}

/// Install the global subscriber
///
/// # Errors
///
/// Fails if the filter is malformed, the run folder cannot be created or a
/// global subscriber is already installed.
pub fn init_logging(options: &LoggingOptions, debug_flags: &CrateDebugFlags) -> Result<LoggingGuard> {
    let filter = debug_flags.to_filter_string(&options.level);
    let env_filter = EnvFilter::try_new(&filter)
        .with_context(|| format!("Invalid log filter: {}", filter))?;

    let mut layers = Vec::new();

    let console = match options.format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_filter(env_filter.clone())
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .json()
            .with_filter(env_filter.clone())
            .boxed(),
    };
    layers.push(console);

    let mut file_guard = None;
    let mut run_dir = None;
    if let Some(base_log_dir) = &options.log_dir {
        let run_folder = create_run_folder(base_log_dir)?;
        let appender = rolling::never(&run_folder, "qforge.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        layers.push(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .json()
                .with_filter(env_filter)
                .boxed(),
        );
        file_guard = Some(guard);
        run_dir = Some(run_folder);
    }

    Registry::default()
        .with(layers)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    if let (Some(base_log_dir), Some(run_folder)) = (&options.log_dir, &run_dir) {
        cleanup_old_runs(base_log_dir, options.keep_runs)?;
        info!(target: "qforge-observability", "Logging run to {}", run_folder.display());
    }

    Ok(LoggingGuard {
        _file_guard: file_guard,
        run_dir,
    })
}

/// Create `base/run_<timestamp>` and return it
pub fn create_run_folder(base_log_dir: &Path) -> Result<PathBuf> {
    let timestamp = Utc::now().format(RUN_TIMESTAMP);
    let run_folder = base_log_dir.join(format!("{}{}", RUN_PREFIX, timestamp));
    std::fs::create_dir_all(&run_folder)
        .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;
    Ok(run_folder)
}

/// Delete all but the `keep_runs` most recent run folders
///
/// Entries whose name is not a run timestamp are left alone.
pub fn cleanup_old_runs(base_log_dir: &Path, keep_runs: usize) -> Result<()> {
    if !base_log_dir.exists() {
        return Ok(());
    }

    let mut runs: Vec<(NaiveDateTime, PathBuf)> = Vec::new();
    let entries = std::fs::read_dir(base_log_dir)
        .with_context(|| format!("Failed to read log directory: {}", base_log_dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let stamp = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_prefix(RUN_PREFIX))
            .and_then(|s| NaiveDateTime::parse_from_str(s, RUN_TIMESTAMP).ok());
        if let Some(dt) = stamp {
            runs.push((dt, path));
        }
    }

    // Newest first
    runs.sort_by(|a, b| b.0.cmp(&a.0));
    for (_, path) in runs.iter().skip(keep_runs) {
        match std::fs::remove_dir_all(path) {
            Ok(()) => debug!(
                target: "qforge-observability",
                "Removed old log run {}",
                path.display()
            ),
            Err(e) => warn!(
                target: "qforge-observability",
                "Failed to remove old log directory {}: {}",
                path.display(),
                e
            ),
        }
    }
    Ok(())
}
