// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Network topology (input width + neurons per layer)
//!
//! Passed explicitly to every component so that shape mismatches are caught
//! up front instead of silently misindexing.

use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, NetworkResult};

/// Two-layer topology: one ReLU hidden layer feeding a single linear output
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TopologyFields", into = "TopologyFields")]
pub struct Topology {
    input_width: usize,
    neurons_per_layer: Vec<usize>,
}

#[derive(Clone, Serialize, Deserialize)]
struct TopologyFields {
    input_width: usize,
    neurons_per_layer: Vec<usize>,
}

impl Topology {
    /// Upper bound on the input width (the evaluation domain enumerates 2^width corners)
    pub const MAX_INPUT_WIDTH: usize = 16;

    /// Hidden layer of `hidden_neurons` ReLU units and one output neuron
    pub fn new(input_width: usize, hidden_neurons: usize) -> NetworkResult<Self> {
        Self::from_layers(input_width, &[hidden_neurons, 1])
    }

    /// Build from an explicit neurons-per-layer sequence
    ///
    /// # Errors
    ///
    /// `NetworkError::InvalidTopology` unless there are exactly two layers, the
    /// hidden layer is non-empty, the output layer has one neuron and the
    /// input width is within `1..=MAX_INPUT_WIDTH`.
    pub fn from_layers(input_width: usize, neurons_per_layer: &[usize]) -> NetworkResult<Self> {
        if input_width == 0 || input_width > Self::MAX_INPUT_WIDTH {
            return Err(NetworkError::InvalidTopology(format!(
                "input width {} outside 1..={}",
                input_width,
                Self::MAX_INPUT_WIDTH
            )));
        }
        match neurons_per_layer {
            [hidden, 1] if *hidden > 0 => Ok(Self {
                input_width,
                neurons_per_layer: neurons_per_layer.to_vec(),
            }),
            [0, _] => Err(NetworkError::InvalidTopology(
                "hidden layer must have at least one neuron".to_string(),
            )),
            [_, out] => Err(NetworkError::InvalidTopology(format!(
                "output layer must have exactly one neuron, got {}",
                out
            ))),
            layers => Err(NetworkError::InvalidTopology(format!(
                "expected 2 layers (hidden, output), got {}",
                layers.len()
            ))),
        }
    }

    /// The 2-2-1 XOR network of the reference hardware
    pub fn xor() -> Self {
        Self {
            input_width: 2,
            neurons_per_layer: vec![2, 1],
        }
    }

    #[inline]
    pub fn input_width(&self) -> usize {
        self.input_width
    }

    #[inline]
    pub fn hidden_neurons(&self) -> usize {
        self.neurons_per_layer[0]
    }

    #[inline]
    pub fn output_neurons(&self) -> usize {
        self.neurons_per_layer[1]
    }

    /// Layout metadata handed to constant-table renderers, e.g. `[2, 1]`
    #[inline]
    pub fn neurons_per_layer(&self) -> &[usize] {
        &self.neurons_per_layer
    }

    /// Number of scalars (biases + weights) in a weight set
    pub fn parameter_count(&self) -> usize {
        let hidden = self.hidden_neurons();
        hidden * (self.input_width + 1) + self.output_neurons() * (hidden + 1)
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::xor()
    }
}

impl TryFrom<TopologyFields> for Topology {
    type Error = NetworkError;

    fn try_from(fields: TopologyFields) -> NetworkResult<Self> {
        Self::from_layers(fields.input_width, &fields.neurons_per_layer)
    }
}

impl From<Topology> for TopologyFields {
    fn from(topology: Topology) -> Self {
        Self {
            input_width: topology.input_width,
            neurons_per_layer: topology.neurons_per_layer,
        }
    }
}
