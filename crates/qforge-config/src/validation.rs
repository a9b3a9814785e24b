// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Every rule runs; all violations are reported together.

use qforge_fixed::FixedPointFormat;
use qforge_network::Topology;
use qforge_render::is_vhdl_identifier;

use crate::{ConfigError, ConfigResult, QforgeConfig};

/// Log levels accepted by `logging.level`
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Log formats accepted by `logging.format`
pub const LOG_FORMATS: [&str; 2] = ["text", "json"];

/// A single rule violation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
    NameConflict { first: String, second: String, name: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
            Self::NameConflict { first, second, name } => {
                write!(f, "Name conflict: {} and {} are both '{}'", first, second, name)
            }
        }
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigValidationError {
    ConfigValidationError::InvalidValue {
        field: field.to_string(),
        reason: reason.into(),
    }
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every violation
pub fn validate_config(config: &QforgeConfig) -> ConfigResult<()> {
    let errors = collect_errors(config);
    if errors.is_empty() {
        return Ok(());
    }
    let error_messages = errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n");
    Err(ConfigError::ValidationError(format!(
        "Configuration validation failed:\n{}",
        error_messages
    )))
}

/// All violations, in section order
pub fn collect_errors(config: &QforgeConfig) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();
    validate_fixed_point(config, &mut errors);
    validate_topology(config, &mut errors);
    validate_training(config, &mut errors);
    validate_emit(config, &mut errors);
    validate_logging(config, &mut errors);
    errors
}

fn validate_fixed_point(config: &QforgeConfig, errors: &mut Vec<ConfigValidationError>) {
    let fp = &config.fixed_point;
    if let Err(e) = FixedPointFormat::new(fp.integer_bits, fp.fractional_bits) {
        errors.push(invalid("fixed_point", e.to_string()));
    }
}

fn validate_topology(config: &QforgeConfig, errors: &mut Vec<ConfigValidationError>) {
    let t = &config.topology;
    if t.input_width == 0 || t.input_width > Topology::MAX_INPUT_WIDTH {
        errors.push(invalid(
            "topology.input_width",
            format!("must be in 1..={}", Topology::MAX_INPUT_WIDTH),
        ));
    }
    if t.hidden_neurons == 0 {
        errors.push(invalid("topology.hidden_neurons", "must be at least 1"));
    }
}

fn validate_training(config: &QforgeConfig, errors: &mut Vec<ConfigValidationError>) {
    let lr = config.training.learning_rate;
    if !lr.is_finite() || lr <= 0.0 {
        errors.push(invalid(
            "training.learning_rate",
            format!("must be a positive number, got {}", lr),
        ));
    }
    if config.training.epochs == 0 {
        errors.push(invalid("training.epochs", "must be at least 1"));
    }
    if config.search.retry_limit == 0 {
        errors.push(invalid("search.retry_limit", "must be at least 1"));
    }
    if config.search.batch_size == 0 {
        errors.push(invalid("search.batch_size", "must be at least 1"));
    }
}

fn validate_emit(config: &QforgeConfig, errors: &mut Vec<ConfigValidationError>) {
    let names = [
        ("emit.constant_name", &config.emit.constant_name),
        ("emit.layer_constant_name", &config.emit.layer_constant_name),
    ];
    for (field, name) in names {
        if name.is_empty() {
            errors.push(ConfigValidationError::MissingRequired {
                field: field.to_string(),
            });
        } else if !is_vhdl_identifier(name) {
            errors.push(invalid(field, format!("'{}' is not a VHDL identifier", name)));
        }
    }
    // VHDL identifiers are case-insensitive
    if !config.emit.constant_name.is_empty()
        && config
            .emit
            .constant_name
            .eq_ignore_ascii_case(&config.emit.layer_constant_name)
    {
        errors.push(ConfigValidationError::NameConflict {
            first: "emit.constant_name".to_string(),
            second: "emit.layer_constant_name".to_string(),
            name: config.emit.constant_name.clone(),
        });
    }
}

fn validate_logging(config: &QforgeConfig, errors: &mut Vec<ConfigValidationError>) {
    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(invalid(
            "logging.level",
            format!("'{}' is not one of {}", config.logging.level, LOG_LEVELS.join(", ")),
        ));
    }
    if !LOG_FORMATS.contains(&config.logging.format.as_str()) {
        errors.push(invalid(
            "logging.format",
            format!("'{}' is not one of {}", config.logging.format, LOG_FORMATS.join(", ")),
        ));
    }
    if config.logging.keep_runs == 0 {
        errors.push(invalid("logging.keep_runs", "must be at least 1"));
    }
}
