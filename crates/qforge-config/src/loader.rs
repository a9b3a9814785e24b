// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Three tiers, later tiers win:
//! 1. TOML file (base values)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, QforgeConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name searched for in the working directory and its parents
pub const CONFIG_FILE_NAME: &str = "qforge.toml";

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "QFORGE_CONFIG_PATH";

/// Find the configuration file
///
/// Search order:
/// 1. `QFORGE_CONFIG_PATH` environment variable
/// 2. Current working directory: `./qforge.toml`
/// 3. Up to five parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by {} not found: {}",
            CONFIG_PATH_ENV,
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        let mut current = cwd;
        for _ in 0..5 {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent.to_path_buf();
                }
                None => break,
            }
        }
    }

    if let Some(found) = search_paths.iter().find(|p| p.exists()) {
        return Ok(found.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");
    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet {} to specify a custom location.",
        CONFIG_FILE_NAME, search_list, CONFIG_PATH_ENV
    )))
}

/// Load configuration from a TOML file and apply overrides
///
/// * `config_path` - explicit file; `None` searches with [`find_config_file`]
/// * `cli_args` - optional CLI overrides (see [`apply_cli_overrides`])
///
/// # Errors
///
/// Returns error if the file is not found or contains invalid TOML.
/// Call [`crate::validate_config`] on the result before use.
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<QforgeConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    debug!(target: "qforge-config", "Loading {}", config_file.display());
    let content = fs::read_to_string(&config_file)?;
    let mut config: QforgeConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }
    Ok(config)
}

/// Like [`load_config`], but a file that is simply absent yields defaults
///
/// An explicit path, or a `QFORGE_CONFIG_PATH` that points nowhere, is
/// still an error.
pub fn load_config_or_default(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<QforgeConfig> {
    if config_path.is_some() || env::var_os(CONFIG_PATH_ENV).is_some() {
        return load_config(config_path, cli_args);
    }
    match find_config_file() {
        Ok(path) => load_config(Some(&path), cli_args),
        Err(ConfigError::FileNotFound(_)) => {
            debug!(target: "qforge-config", "No {} found, using defaults", CONFIG_FILE_NAME);
            let mut config = QforgeConfig::default();
            apply_environment_overrides(&mut config);
            if let Some(cli) = cli_args {
                apply_cli_overrides(&mut config, cli);
            }
            Ok(config)
        }
        Err(e) => Err(e),
    }
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `QFORGE_INTEGER_BITS` -> `fixed_point.integer_bits`
/// - `QFORGE_FRACTIONAL_BITS` -> `fixed_point.fractional_bits`
/// - `QFORGE_LEARNING_RATE` -> `training.learning_rate`
/// - `QFORGE_EPOCHS` -> `training.epochs`
/// - `QFORGE_RETRY_LIMIT` -> `search.retry_limit`
/// - `QFORGE_START_SEED` -> `search.start_seed`
/// - `QFORGE_BATCH_SIZE` -> `search.batch_size`
/// - `QFORGE_CONSTANT_NAME` -> `emit.constant_name`
/// - `QFORGE_LOG_LEVEL` -> `logging.level`
///
/// Values that fail to parse are ignored.
pub fn apply_environment_overrides(config: &mut QforgeConfig) {
    let var = |name: &str| env::var(name).ok();

    if let Some(bits) = var("QFORGE_INTEGER_BITS").and_then(|v| v.parse::<u32>().ok()) {
        config.fixed_point.integer_bits = bits;
    }
    if let Some(bits) = var("QFORGE_FRACTIONAL_BITS").and_then(|v| v.parse::<u32>().ok()) {
        config.fixed_point.fractional_bits = bits;
    }
    if let Some(lr) = var("QFORGE_LEARNING_RATE").and_then(|v| v.parse::<f64>().ok()) {
        config.training.learning_rate = lr;
    }
    if let Some(epochs) = var("QFORGE_EPOCHS").and_then(|v| v.parse::<u32>().ok()) {
        config.training.epochs = epochs;
    }
    if let Some(limit) = var("QFORGE_RETRY_LIMIT").and_then(|v| v.parse::<u64>().ok()) {
        config.search.retry_limit = limit;
    }
    if let Some(seed) = var("QFORGE_START_SEED").and_then(|v| v.parse::<u64>().ok()) {
        config.search.start_seed = seed;
    }
    if let Some(batch) = var("QFORGE_BATCH_SIZE").and_then(|v| v.parse::<usize>().ok()) {
        config.search.batch_size = batch;
    }
    if let Some(name) = var("QFORGE_CONSTANT_NAME") {
        config.emit.constant_name = name;
    }
    if let Some(level) = var("QFORGE_LOG_LEVEL") {
        config.logging.level = level;
    }
}

/// Apply CLI argument overrides to configuration
///
/// Keys are the snake_case field names, e.g.
/// `{"learning_rate": "0.01", "epochs": "4000"}`. Unknown keys and values
/// that fail to parse are ignored.
pub fn apply_cli_overrides(config: &mut QforgeConfig, cli_args: &HashMap<String, String>) {
    let parsed = |key: &str| cli_args.get(key).map(String::as_str);

    if let Some(v) = parsed("integer_bits").and_then(|v| v.parse::<u32>().ok()) {
        config.fixed_point.integer_bits = v;
    }
    if let Some(v) = parsed("fractional_bits").and_then(|v| v.parse::<u32>().ok()) {
        config.fixed_point.fractional_bits = v;
    }
    if let Some(v) = parsed("input_width").and_then(|v| v.parse::<usize>().ok()) {
        config.topology.input_width = v;
    }
    if let Some(v) = parsed("hidden_neurons").and_then(|v| v.parse::<usize>().ok()) {
        config.topology.hidden_neurons = v;
    }
    if let Some(v) = parsed("learning_rate").and_then(|v| v.parse::<f64>().ok()) {
        config.training.learning_rate = v;
    }
    if let Some(v) = parsed("epochs").and_then(|v| v.parse::<u32>().ok()) {
        config.training.epochs = v;
    }
    if let Some(v) = parsed("start_seed").and_then(|v| v.parse::<u64>().ok()) {
        config.search.start_seed = v;
    }
    if let Some(v) = parsed("retry_limit").and_then(|v| v.parse::<u64>().ok()) {
        config.search.retry_limit = v;
    }
    if let Some(v) = parsed("batch_size").and_then(|v| v.parse::<usize>().ok()) {
        config.search.batch_size = v;
    }
    if let Some(v) = parsed("constant_name") {
        config.emit.constant_name = v.to_string();
    }
    if let Some(v) = parsed("layer_constant_name") {
        config.emit.layer_constant_name = v.to_string();
    }
    if let Some(v) = parsed("log_level") {
        config.logging.level = v.to_string();
    }
    if let Some(v) = parsed("log_format") {
        config.logging.format = v.to_string();
    }
    if let Some(v) = parsed("log_dir") {
        config.logging.log_dir = PathBuf::from(v);
    }
}
