// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Weight constant table for the hardware
//!
//! Flattens an accepted weight set into the ordered scalar list the hardware
//! weight ROM expects. Values are quantized; rendering them as source text is
//! the job of a separate renderer.

use qforge_fixed::FixedPointCodec;
use serde::Serialize;
use tracing::debug;

use crate::error::NetworkResult;
use crate::topology::Topology;
use crate::weights::WeightSet;

/// Quantized scalars in hardware layout order plus the layer sizes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightConstantTable {
    neurons_per_layer: Vec<usize>,
    values: Vec<f64>,
}

impl WeightConstantTable {
    #[inline]
    pub fn neurons_per_layer(&self) -> &[usize] {
        &self.neurons_per_layer
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_parts(self) -> (Vec<usize>, Vec<f64>) {
        (self.neurons_per_layer, self.values)
    }
}

/// Produces [`WeightConstantTable`]s for one topology and format
#[derive(Debug, Clone, PartialEq)]
pub struct WeightEmitter {
    topology: Topology,
    codec: FixedPointCodec,
}

impl WeightEmitter {
    pub fn new(topology: Topology, codec: FixedPointCodec) -> Self {
        Self { topology, codec }
    }

    /// Quantize and flatten `weights`
    ///
    /// Order: for each hidden neuron `(bias, w_in0, w_in1, ..)`, then the
    /// output neuron `(bias, w_h0, w_h1, ..)`. Length is always
    /// `topology.parameter_count()`.
    ///
    /// # Errors
    ///
    /// `NetworkError::OutOfDomainShape` if `weights` does not match the topology.
    pub fn emit(&self, weights: &WeightSet) -> NetworkResult<WeightConstantTable> {
        weights.check_shape(&self.topology)?;
        let values = weights.quantize(&self.codec).layout_order();
        debug!(
            target: "qforge-network",
            "Emitted {} {} constants for layers {:?}",
            values.len(),
            self.codec.format(),
            self.topology.neurons_per_layer()
        );
        Ok(WeightConstantTable {
            neurons_per_layer: self.topology.neurons_per_layer().to_vec(),
            values,
        })
    }
}
