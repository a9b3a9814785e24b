// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Command-line arguments
//!
//! `--debug-<crate>` flags are stripped before parsing (see
//! [`qforge_observability::split_debug_args`]) and never reach clap.

use clap::{Args, Parser, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;

/// qforge - train, verify and emit fixed-point-safe weights for hardware MLPs
#[derive(Parser, Debug)]
#[command(
    name = "qforge",
    version,
    author,
    long_about = None,
    after_help = qforge_observability::debug_flags_help()
)]
pub struct Cli {
    /// Path to qforge.toml (default: search ./qforge.toml and parents)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging for every crate
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Train seed after seed until the quantized network is exact
    Search(SearchArgs),
    /// Check a weight file in float and fixed-point mode
    Verify(VerifyArgs),
    /// Render the constant table for a weight file
    Emit(EmitArgs),
}

#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Adam learning rate
    #[arg(long)]
    pub lr: Option<f64>,

    /// Optimisation steps per seed
    #[arg(long)]
    pub epochs: Option<u32>,

    /// Number of seeds to try
    #[arg(long)]
    pub retry_limit: Option<u64>,

    /// First seed of the window
    #[arg(long)]
    pub start_seed: Option<u64>,

    /// Seeds evaluated in parallel (1 = sequential)
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Write the accepted weights as JSON
    #[arg(long)]
    pub weights_out: Option<PathBuf>,

    /// Write the constant table here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Weight set JSON ({"w1": .., "b1": .., "w2": .., "b2": ..})
    #[arg(short, long)]
    pub weights: PathBuf,
}

#[derive(Args, Debug)]
pub struct EmitArgs {
    /// Weight set JSON
    #[arg(short, long)]
    pub weights: PathBuf,

    /// Write the constant table here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Flags that override configuration values, keyed like qforge.toml fields
    pub fn config_overrides(&self) -> HashMap<String, String> {
        let mut overrides = HashMap::new();
        if self.verbose {
            overrides.insert("log_level".to_string(), "debug".to_string());
        }
        if let Command::Search(args) = &self.command {
            let pairs = [
                ("learning_rate", args.lr.map(|v| v.to_string())),
                ("epochs", args.epochs.map(|v| v.to_string())),
                ("retry_limit", args.retry_limit.map(|v| v.to_string())),
                ("start_seed", args.start_seed.map(|v| v.to_string())),
                ("batch_size", args.batch_size.map(|v| v.to_string())),
            ];
            for (key, value) in pairs {
                if let Some(value) = value {
                    overrides.insert(key.to_string(), value);
                }
            }
        }
        overrides
    }
}
