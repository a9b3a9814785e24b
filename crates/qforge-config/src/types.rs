// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! Each struct maps to one section of `qforge.toml`. Every field has a
//! default, so a partial (or empty) file is valid input.

use std::path::PathBuf;

use qforge_fixed::{FixedPointCodec, FixedPointFormat};
use qforge_network::Topology;
use qforge_render::{DEFAULT_CONSTANT_NAME, DEFAULT_LAYER_CONSTANT_NAME};
use qforge_search::{SearchConfig, TrainingParams, DEFAULT_EPOCHS, DEFAULT_LEARNING_RATE, RETRY_LIMIT};
use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct QforgeConfig {
    pub fixed_point: FixedPointConfig,
    pub topology: TopologyConfig,
    pub training: TrainingConfig,
    pub search: SearchSection,
    pub emit: EmitConfig,
    pub logging: LoggingConfig,
}

/// Datapath number format
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FixedPointConfig {
    pub integer_bits: u32,
    pub fractional_bits: u32,
}

impl Default for FixedPointConfig {
    fn default() -> Self {
        Self {
            integer_bits: 16,
            fractional_bits: 16,
        }
    }
}

impl FixedPointConfig {
    pub fn format(&self) -> ConfigResult<FixedPointFormat> {
        FixedPointFormat::new(self.integer_bits, self.fractional_bits)
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }

    pub fn codec(&self) -> ConfigResult<FixedPointCodec> {
        self.format().map(FixedPointCodec::new)
    }
}

/// Network shape
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TopologyConfig {
    pub input_width: usize,
    pub hidden_neurons: usize,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            input_width: 2,
            hidden_neurons: 2,
        }
    }
}

impl TopologyConfig {
    pub fn topology(&self) -> ConfigResult<Topology> {
        Topology::new(self.input_width, self.hidden_neurons)
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }
}

/// Optimiser hyperparameters
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub learning_rate: f64,
    pub epochs: u32,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            epochs: DEFAULT_EPOCHS,
        }
    }
}

/// Seed window of the search (`[search]`)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSection {
    pub start_seed: u64,
    pub retry_limit: u64,
    pub batch_size: usize,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            start_seed: 0,
            retry_limit: RETRY_LIMIT,
            batch_size: 1,
        }
    }
}

/// Names of the generated constants
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EmitConfig {
    pub constant_name: String,
    pub layer_constant_name: String,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            constant_name: DEFAULT_CONSTANT_NAME.to_string(),
            layer_constant_name: DEFAULT_LAYER_CONSTANT_NAME.to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// "text" or "json"
    pub format: String,
    /// Per-run JSON log files go here; empty disables file logging
    pub log_dir: PathBuf,
    /// Run folders kept in `log_dir`
    pub keep_runs: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            log_dir: PathBuf::new(),
            keep_runs: 10,
        }
    }
}

impl QforgeConfig {
    /// Search parameters for [`qforge_search::TrainingSearchLoop`]
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            start_seed: self.search.start_seed,
            retry_limit: self.search.retry_limit,
            batch_size: self.search.batch_size,
            training: TrainingParams {
                learning_rate: self.training.learning_rate,
                epochs: self.training.epochs,
            },
        }
    }
}
