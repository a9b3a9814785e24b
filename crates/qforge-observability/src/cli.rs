// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! CLI argument parsing for per-crate debug flags
//!
//! Supports flags like `--debug-qforge-search` to raise one crate to
//! debug level while everything else stays at the configured level.

use std::collections::BTreeSet;
use std::env;

use crate::KNOWN_CRATES;

/// Environment variable with comma-separated crate names, or `all`
pub const DEBUG_ENV: &str = "QFORGE_DEBUG";

/// Crates with debug logging enabled
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrateDebugFlags {
    pub enabled_crates: BTreeSet<String>,
}

impl CrateDebugFlags {
    /// Parse debug flags from command-line arguments
    ///
    /// Looks for arguments matching `--debug-{crate-name}`.
    /// `--debug-all` enables every known crate.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = CrateDebugFlags::default();
        for arg in args {
            if arg == "--debug-all" {
                flags.enable_all();
            } else if let Some(crate_name) = arg.strip_prefix("--debug-") {
                flags.enabled_crates.insert(crate_name.to_string());
            }
        }
        flags
    }

    /// Add crates named by a `QFORGE_DEBUG`-style value
    pub fn merge_env_value(&mut self, value: &str) {
        if value.trim() == "all" {
            self.enable_all();
            return;
        }
        for crate_name in value.split(',') {
            let crate_name = crate_name.trim();
            if !crate_name.is_empty() {
                self.enabled_crates.insert(crate_name.to_string());
            }
        }
    }

    fn enable_all(&mut self) {
        for crate_name in KNOWN_CRATES {
            self.enabled_crates.insert(crate_name.to_string());
        }
    }

    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains(crate_name)
    }

    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// Debug flags naming crates that never log
    pub fn unknown_crates(&self) -> Vec<&str> {
        self.enabled_crates
            .iter()
            .map(String::as_str)
            .filter(|name| !KNOWN_CRATES.contains(name))
            .collect()
    }

    /// `EnvFilter` directives: `crate=debug` per flag, then the default level
    ///
    /// e.g. `"qforge-search=debug,info"`
    pub fn to_filter_string(&self, default_level: &str) -> String {
        let mut filters: Vec<String> = self
            .enabled_crates
            .iter()
            .map(|crate_name| format!("{}=debug", crate_name))
            .collect();
        filters.push(default_level.to_ascii_lowercase());
        filters.join(",")
    }
}

/// Separate `--debug-*` flags from the arguments meant for the argument parser
///
/// Flags from `QFORGE_DEBUG` are merged into the result.
pub fn split_debug_args<I>(args: I) -> (CrateDebugFlags, Vec<String>)
where
    I: IntoIterator<Item = String>,
{
    let (debug_args, rest): (Vec<String>, Vec<String>) =
        args.into_iter().partition(|a| a.starts_with("--debug-"));
    let mut flags = CrateDebugFlags::from_args(debug_args);
    if let Ok(value) = env::var(DEBUG_ENV) {
        flags.merge_env_value(&value);
    }
    (flags, rest)
}

/// Help text for the debug flags
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug-all                    Enable debug logging for all crates
  --debug-{{crate-name}}          Enable debug logging for one crate

Available crates:
  {}

Environment Variable:
  {}={{crate-name}}[,{{crate-name}}]  Enable debug for crates (comma-separated)
  {}=all                               Enable debug for all crates
"#,
        KNOWN_CRATES.join(", "),
        DEBUG_ENV,
        DEBUG_ENV
    )
}
