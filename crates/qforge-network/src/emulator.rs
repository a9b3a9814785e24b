// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Hardware Forward Emulator
//!
//! Software replica of the hardware inference datapath.
//!
//! ```text
//! Float mode:
//!     h[n]  = max(0, b1[n] + Σ_i W1[n][i] · x[i])
//!     logit = b2 + Σ_n W2[n] · h[n]
//!     label = logit > 0
//!
//! Quantized mode:
//!     same chain, but W1, b1, W2, b2 and x are each quantized first.
//!     h[n] is NOT re-quantized: the hardware carries the ReLU result at
//!     full internal precision into the output stage.
//! ```
//!
//! The `> 0` comparison is exact in both modes (sign-bit comparator).

use qforge_fixed::FixedPointCodec;
use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, NetworkResult};
use crate::topology::Topology;
use crate::weights::WeightSet;

/// Arithmetic mode of a forward pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Float,
    Quantized,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Float => "float",
            Mode::Quantized => "quantized",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one forward pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForwardOutput {
    /// ReLU outputs of the hidden layer (diagnostics only)
    pub hidden: Vec<f64>,
    /// Pre-threshold output
    pub logit: f64,
    /// 1 if `logit > 0`, else 0
    pub label: u8,
}

/// Forward-pass emulator bound to one topology and one fixed-point format
#[derive(Debug, Clone, PartialEq)]
pub struct HardwareEmulator {
    topology: Topology,
    codec: FixedPointCodec,
}

impl HardwareEmulator {
    pub fn new(topology: Topology, codec: FixedPointCodec) -> Self {
        Self { topology, codec }
    }

    #[inline]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    #[inline]
    pub fn codec(&self) -> &FixedPointCodec {
        &self.codec
    }

    /// Run a forward pass in `mode`
    pub fn forward(
        &self,
        mode: Mode,
        weights: &WeightSet,
        input: &[f64],
    ) -> NetworkResult<ForwardOutput> {
        match mode {
            Mode::Float => self.forward_float(weights, input),
            Mode::Quantized => self.forward_quantized(weights, input),
        }
    }

    /// Forward pass on the raw floating-point parameters
    ///
    /// # Errors
    ///
    /// `NetworkError::OutOfDomainShape` if `weights` or `input` do not match
    /// the emulator topology.
    pub fn forward_float(&self, weights: &WeightSet, input: &[f64]) -> NetworkResult<ForwardOutput> {
        self.check_operands(weights, input)?;
        Ok(propagate(weights.w1(), weights.b1(), weights.w2(), weights.b2(), input))
    }

    /// Forward pass with every operand snapped to the fixed-point grid
    ///
    /// The weight set is quantized fresh on every call.
    pub fn forward_quantized(
        &self,
        weights: &WeightSet,
        input: &[f64],
    ) -> NetworkResult<ForwardOutput> {
        self.check_operands(weights, input)?;
        let q = weights.quantize(&self.codec);
        let xq = self.codec.quantize_slice(input);
        Ok(propagate(q.w1(), q.b1(), q.w2(), q.b2(), &xq))
    }

    fn check_operands(&self, weights: &WeightSet, input: &[f64]) -> NetworkResult<()> {
        weights.check_shape(&self.topology)?;
        if input.len() != self.topology.input_width() {
            return Err(NetworkError::OutOfDomainShape {
                what: "input".to_string(),
                expected: self.topology.input_width(),
                actual: input.len(),
            });
        }
        Ok(())
    }
}

/// Shared topology-level algorithm; operands are used exactly as given
fn propagate(
    w1: &[Vec<f64>],
    b1: &[f64],
    w2: &[Vec<f64>],
    b2: &[f64],
    input: &[f64],
) -> ForwardOutput {
    let hidden: Vec<f64> = w1
        .iter()
        .zip(b1)
        .map(|(row, bias)| relu(bias + dot(row, input)))
        .collect();

    let logit = b2[0] + dot(&w2[0], &hidden);

    ForwardOutput {
        hidden,
        logit,
        label: threshold(logit),
    }
}

#[inline]
fn dot(weights: &[f64], values: &[f64]) -> f64 {
    weights
        .iter()
        .zip(values)
        .fold(0.0, |acc, (w, v)| acc + w * v)
}

#[inline]
fn relu(v: f64) -> f64 {
    if v > 0.0 {
        v
    } else {
        0.0
    }
}

#[inline]
fn threshold(logit: f64) -> u8 {
    u8::from(logit > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORNERS: [[f64; 2]; 4] = [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];

    fn emulator() -> HardwareEmulator {
        HardwareEmulator::new(Topology::xor(), FixedPointCodec::q16_16())
    }

    /// Textbook ReLU solution: h = relu(x0 + x1 - [0, 1]), y = h0 - 2·h1 - 0.5
    fn relu_xor() -> WeightSet {
        WeightSet::new(
            vec![vec![1.0, 1.0], vec![1.0, 1.0]],
            vec![0.0, -1.0],
            vec![vec![1.0, -2.0]],
            vec![-0.5],
        )
    }

    #[test]
    fn test_relu_xor_float_labels() {
        let emu = emulator();
        let w = relu_xor();
        let labels: Vec<u8> = CORNERS
            .iter()
            .map(|x| emu.forward_float(&w, x).unwrap().label)
            .collect();
        assert_eq!(labels, vec![0, 1, 1, 0]);
    }

    #[test]
    fn test_relu_xor_logits() {
        let emu = emulator();
        let w = relu_xor();
        let out = emu.forward_float(&w, &[0.0, 0.0]).unwrap();
        assert_eq!(out.hidden, vec![0.0, 0.0]);
        assert_eq!(out.logit, -0.5);
        let out = emu.forward_float(&w, &[0.0, 1.0]).unwrap();
        assert_eq!(out.hidden, vec![1.0, 0.0]);
        assert_eq!(out.logit, 0.5);
        let out = emu.forward_float(&w, &[1.0, 1.0]).unwrap();
        assert_eq!(out.hidden, vec![2.0, 1.0]);
        assert_eq!(out.logit, -0.5);
    }

    #[test]
    fn test_sigmoid_style_weights_compute_and_under_relu() {
        // W1=[[20,20],[-20,-20]], b1=[-10,30], W2=[[20,-20]], b2=[-10]
        // h = [10, 10] on the mixed corners, so the output stage cancels to -10.
        let emu = emulator();
        let w = WeightSet::new(
            vec![vec![20.0, 20.0], vec![-20.0, -20.0]],
            vec![-10.0, 30.0],
            vec![vec![20.0, -20.0]],
            vec![-10.0],
        );
        let outputs: Vec<ForwardOutput> = CORNERS
            .iter()
            .map(|x| emu.forward_float(&w, x).unwrap())
            .collect();
        let labels: Vec<u8> = outputs.iter().map(|o| o.label).collect();
        let logits: Vec<f64> = outputs.iter().map(|o| o.logit).collect();
        assert_eq!(labels, vec![0, 0, 0, 1]);
        assert_eq!(logits, vec![-610.0, -10.0, -10.0, 590.0]);
    }

    #[test]
    fn test_zero_weights_give_label_zero() {
        let emu = emulator();
        let w = WeightSet::zeros(&Topology::xor());
        for x in CORNERS {
            for mode in [Mode::Float, Mode::Quantized] {
                let out = emu.forward(mode, &w, &x).unwrap();
                assert_eq!(out.logit, 0.0);
                assert_eq!(out.label, 0, "zero logit must not pass the > 0 threshold");
            }
        }
    }

    #[test]
    fn test_quantized_mode_snaps_operands() {
        let emu = emulator();
        let step = 1.0 / 65536.0;
        // Output bias sits 0.4 step above zero: float says 1, hardware sees 0
        let w = WeightSet::new(
            vec![vec![0.0, 0.0], vec![0.0, 0.0]],
            vec![0.0, 0.0],
            vec![vec![0.0, 0.0]],
            vec![0.4 * step],
        );
        assert_eq!(emu.forward_float(&w, &[0.0, 0.0]).unwrap().label, 1);
        let q = emu.forward_quantized(&w, &[0.0, 0.0]).unwrap();
        assert_eq!(q.logit, 0.0);
        assert_eq!(q.label, 0);
    }

    #[test]
    fn test_quantized_mode_snaps_inputs() {
        let emu = emulator();
        let step = 1.0 / 65536.0;
        let w = WeightSet::new(
            vec![vec![1.0, 0.0], vec![0.0, 0.0]],
            vec![0.0, 0.0],
            vec![vec![1.0, 0.0]],
            vec![0.0],
        );
        let x = [0.3 * step, 0.0];
        assert_eq!(emu.forward_float(&w, &x).unwrap().label, 1);
        assert_eq!(emu.forward_quantized(&w, &x).unwrap().label, 0);
    }

    #[test]
    fn test_relu_output_not_requantized() {
        let emu = emulator();
        let step = 1.0 / 65536.0;
        // Hidden pre-activation = 3 steps * 0.5 = 1.5 steps: off the grid.
        // The output stage must see 1.5 steps, not a re-rounded 2 steps.
        let w = WeightSet::new(
            vec![vec![0.5, 0.0], vec![0.0, 0.0]],
            vec![0.0, 0.0],
            vec![vec![1.0, 0.0]],
            vec![0.0],
        );
        let x = [3.0 * step, 0.0];
        let out = emu.forward_quantized(&w, &x).unwrap();
        assert_eq!(out.hidden[0], 1.5 * step);
        assert_eq!(out.logit, 1.5 * step);
        assert_ne!(out.logit, FixedPointCodec::q16_16().quantize(out.logit));
    }

    #[test]
    fn test_threshold_is_exact() {
        let emu = emulator();
        let tiny = f64::MIN_POSITIVE;
        let w = WeightSet::new(
            vec![vec![0.0, 0.0], vec![0.0, 0.0]],
            vec![0.0, 0.0],
            vec![vec![0.0, 0.0]],
            vec![tiny],
        );
        // Float threshold compares the unquantized logit
        assert_eq!(emu.forward_float(&w, &[0.0, 0.0]).unwrap().label, 1);
    }

    #[test]
    fn test_shape_errors() {
        let emu = emulator();
        let w = relu_xor();
        assert!(matches!(
            emu.forward_float(&w, &[1.0]),
            Err(NetworkError::OutOfDomainShape { expected: 2, actual: 1, .. })
        ));
        let wide = WeightSet::zeros(&Topology::new(3, 2).unwrap());
        assert!(emu.forward_quantized(&wide, &[0.0, 0.0]).is_err());
    }

    #[test]
    fn test_wider_hidden_layer() {
        let t = Topology::new(2, 3).unwrap();
        let emu = HardwareEmulator::new(t, FixedPointCodec::q16_16());
        let w = WeightSet::new(
            vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]],
            vec![0.0, 0.0, -1.0],
            vec![vec![1.0, 1.0, -2.0]],
            vec![-0.5],
        );
        let labels: Vec<u8> = CORNERS
            .iter()
            .map(|x| emu.forward_quantized(&w, x).unwrap().label)
            .collect();
        assert_eq!(labels, vec![0, 1, 1, 0]);
    }
}
