// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Weight sets
//!
//! A [`WeightSet`] is produced once per training attempt and never mutated.
//! A [`QuantizedWeightSet`] can only be obtained by quantizing a `WeightSet`,
//! so a quantized image is always derived fresh from the float parameters.

use qforge_fixed::{FixedPointCodec, FixedPointFormat};
use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, NetworkResult};
use crate::topology::Topology;

/// Floating-point parameters of the two-layer network
///
/// - `w1`: hidden × input matrix, `b1`: one bias per hidden neuron
/// - `w2`: output × hidden matrix, `b2`: one bias per output neuron
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSet {
    w1: Vec<Vec<f64>>,
    b1: Vec<f64>,
    w2: Vec<Vec<f64>>,
    b2: Vec<f64>,
}

impl WeightSet {
    pub fn new(w1: Vec<Vec<f64>>, b1: Vec<f64>, w2: Vec<Vec<f64>>, b2: Vec<f64>) -> Self {
        Self { w1, b1, w2, b2 }
    }

    /// All-zero parameters shaped for `topology`
    pub fn zeros(topology: &Topology) -> Self {
        let hidden = topology.hidden_neurons();
        let outputs = topology.output_neurons();
        Self {
            w1: vec![vec![0.0; topology.input_width()]; hidden],
            b1: vec![0.0; hidden],
            w2: vec![vec![0.0; hidden]; outputs],
            b2: vec![0.0; outputs],
        }
    }

    #[inline]
    pub fn w1(&self) -> &[Vec<f64>] {
        &self.w1
    }

    #[inline]
    pub fn b1(&self) -> &[f64] {
        &self.b1
    }

    #[inline]
    pub fn w2(&self) -> &[Vec<f64>] {
        &self.w2
    }

    #[inline]
    pub fn b2(&self) -> &[f64] {
        &self.b2
    }

    /// Verify every matrix/vector dimension against `topology`
    ///
    /// # Errors
    ///
    /// `NetworkError::OutOfDomainShape` naming the first offending tensor.
    pub fn check_shape(&self, topology: &Topology) -> NetworkResult<()> {
        check_params(&self.w1, &self.b1, &self.w2, &self.b2, topology)
    }

    /// Snap every scalar onto the fixed-point grid of `codec`
    pub fn quantize(&self, codec: &FixedPointCodec) -> QuantizedWeightSet {
        QuantizedWeightSet {
            w1: codec.quantize_matrix(&self.w1),
            b1: codec.quantize_slice(&self.b1),
            w2: codec.quantize_matrix(&self.w2),
            b2: codec.quantize_slice(&self.b2),
            format: codec.format(),
        }
    }

    /// Bias-first scalar order used by the hardware constant table
    ///
    /// For each hidden neuron `(bias, w_in0, w_in1, ..)`, then for each
    /// output neuron `(bias, w_h0, w_h1, ..)`.
    pub fn layout_order(&self) -> Vec<f64> {
        layout(&self.w1, &self.b1, &self.w2, &self.b2)
    }
}

/// [`WeightSet`] with every scalar on the fixed-point grid
///
/// Same shape as its source; has no public constructor besides
/// [`WeightSet::quantize`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuantizedWeightSet {
    w1: Vec<Vec<f64>>,
    b1: Vec<f64>,
    w2: Vec<Vec<f64>>,
    b2: Vec<f64>,
    #[serde(skip)]
    format: FixedPointFormat,
}

impl QuantizedWeightSet {
    #[inline]
    pub fn w1(&self) -> &[Vec<f64>] {
        &self.w1
    }

    #[inline]
    pub fn b1(&self) -> &[f64] {
        &self.b1
    }

    #[inline]
    pub fn w2(&self) -> &[Vec<f64>] {
        &self.w2
    }

    #[inline]
    pub fn b2(&self) -> &[f64] {
        &self.b2
    }

    /// Format the values were quantized to
    #[inline]
    pub fn format(&self) -> FixedPointFormat {
        self.format
    }

    pub fn check_shape(&self, topology: &Topology) -> NetworkResult<()> {
        check_params(&self.w1, &self.b1, &self.w2, &self.b2, topology)
    }

    /// See [`WeightSet::layout_order`]
    pub fn layout_order(&self) -> Vec<f64> {
        layout(&self.w1, &self.b1, &self.w2, &self.b2)
    }
}

fn check_params(
    w1: &[Vec<f64>],
    b1: &[f64],
    w2: &[Vec<f64>],
    b2: &[f64],
    topology: &Topology,
) -> NetworkResult<()> {
    let inputs = topology.input_width();
    let hidden = topology.hidden_neurons();
    let outputs = topology.output_neurons();

    if w1.len() != hidden {
        return Err(NetworkError::shape("w1 rows", hidden, w1.len()));
    }
    for (n, row) in w1.iter().enumerate() {
        if row.len() != inputs {
            return Err(NetworkError::shape(format!("w1 row {}", n), inputs, row.len()));
        }
    }
    if b1.len() != hidden {
        return Err(NetworkError::shape("b1", hidden, b1.len()));
    }
    if w2.len() != outputs {
        return Err(NetworkError::shape("w2 rows", outputs, w2.len()));
    }
    for (n, row) in w2.iter().enumerate() {
        if row.len() != hidden {
            return Err(NetworkError::shape(format!("w2 row {}", n), hidden, row.len()));
        }
    }
    if b2.len() != outputs {
        return Err(NetworkError::shape("b2", outputs, b2.len()));
    }
    Ok(())
}

fn layout(w1: &[Vec<f64>], b1: &[f64], w2: &[Vec<f64>], b2: &[f64]) -> Vec<f64> {
    let mut values = Vec::new();
    for (bias, row) in b1.iter().zip(w1) {
        values.push(*bias);
        values.extend_from_slice(row);
    }
    for (bias, row) in b2.iter().zip(w2) {
        values.push(*bias);
        values.extend_from_slice(row);
    }
    values
}
