// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use qforge_network::WeightConstantTable;
use serde::{Deserialize, Serialize};

/// Default name of the weight constant
pub const DEFAULT_CONSTANT_NAME: &str = "WEIGHTS_C";

/// Default name of the layer-size constant
pub const DEFAULT_LAYER_CONSTANT_NAME: &str = "NEURONS_PER_LAYER_C";

/// Everything a renderer needs; the renderer adds no data of its own
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    pub constant_name: String,
    pub layer_constant_name: String,
    pub neurons_per_layer: Vec<usize>,
    pub values: Vec<f64>,
}

impl RenderRequest {
    /// Request for `table` under the default constant names
    pub fn from_table(table: &WeightConstantTable) -> Self {
        Self::named(DEFAULT_CONSTANT_NAME, DEFAULT_LAYER_CONSTANT_NAME, table)
    }

    pub fn named(
        constant_name: impl Into<String>,
        layer_constant_name: impl Into<String>,
        table: &WeightConstantTable,
    ) -> Self {
        Self {
            constant_name: constant_name.into(),
            layer_constant_name: layer_constant_name.into(),
            neurons_per_layer: table.neurons_per_layer().to_vec(),
            values: table.values().to_vec(),
        }
    }
}
