// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Trainers
//!
//! The search loop only needs a deterministic `seed -> WeightSet` function.
//! [`MlpTrainer`] is the reference implementation:
//!
//! ```text
//! init:   every weight and bias ~ U(-1/sqrt(fan_in), 1/sqrt(fan_in))
//!         drawn from StdRng::seed_from_u64(seed)
//! loss:   mean binary cross-entropy on the logit, whole domain per step
//! update: Adam (β1 = 0.9, β2 = 0.999, ε = 1e-8)
//! ```
//!
//! Parameters are kept as one flat vector in hardware layout order
//! (per neuron: bias, then incoming weights), so the optimizer state is a
//! pair of vectors of the same length.

use qforge_network::{EvaluationDomain, Topology, WeightSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Default Adam step size
pub const DEFAULT_LEARNING_RATE: f64 = 0.05;

/// Default number of full-batch optimisation steps
pub const DEFAULT_EPOCHS: u32 = 2000;

const BETA1: f64 = 0.9;
const BETA2: f64 = 0.999;
const EPSILON: f64 = 1e-8;

/// Hyperparameters handed to every training attempt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingParams {
    pub learning_rate: f64,
    pub epochs: u32,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            epochs: DEFAULT_EPOCHS,
        }
    }
}

/// Produces one weight set per seed
///
/// Implementations must be deterministic: the same seed and params always
/// yield the same weights. `Sync` lets batched search share one trainer
/// across worker threads.
pub trait Trainer: Sync {
    fn train(&self, seed: u64, params: &TrainingParams) -> WeightSet;
}

impl<F> Trainer for F
where
    F: Fn(u64, &TrainingParams) -> WeightSet + Sync,
{
    fn train(&self, seed: u64, params: &TrainingParams) -> WeightSet {
        self(seed, params)
    }
}

/// Full-batch Adam trainer for the two-layer ReLU network
#[derive(Debug, Clone)]
pub struct MlpTrainer {
    topology: Topology,
    domain: EvaluationDomain,
}

impl MlpTrainer {
    pub fn new(topology: Topology) -> Self {
        let domain = EvaluationDomain::parity(topology.input_width());
        Self { topology, domain }
    }

    #[inline]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Seeded starting point of an attempt, before any optimisation
    pub fn initial_weights(&self, seed: u64) -> WeightSet {
        self.unflatten(&self.init_params(seed))
    }

    /// Mean binary cross-entropy of `weights` over the training domain
    ///
    /// Returns `None` if `weights` does not fit the topology.
    pub fn mean_loss(&self, weights: &WeightSet) -> Option<f64> {
        weights.check_shape(&self.topology).ok()?;
        let params = weights.layout_order();
        let total: f64 = self
            .domain
            .samples()
            .iter()
            .map(|s| {
                let (_, _, logit) = self.forward(&params, &s.input);
                bce_with_logits(logit, f64::from(s.expected))
            })
            .sum();
        Some(total / self.domain.len() as f64)
    }

    fn init_params(&self, seed: u64) -> Vec<f64> {
        let inputs = self.topology.input_width();
        let hidden = self.topology.hidden_neurons();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut params = Vec::with_capacity(self.topology.parameter_count());

        let bound = 1.0 / (inputs as f64).sqrt();
        for _ in 0..hidden * (inputs + 1) {
            params.push(rng.gen_range(-bound..bound));
        }
        let bound = 1.0 / (hidden as f64).sqrt();
        for _ in 0..hidden + 1 {
            params.push(rng.gen_range(-bound..bound));
        }
        params
    }

    /// Returns (pre-activations, activations, logit)
    fn forward(&self, params: &[f64], input: &[f64]) -> (Vec<f64>, Vec<f64>, f64) {
        let inputs = self.topology.input_width();
        let hidden = self.topology.hidden_neurons();
        let mut pre = Vec::with_capacity(hidden);
        let mut act = Vec::with_capacity(hidden);
        for n in 0..hidden {
            let row = n * (inputs + 1);
            let z = params[row]
                + params[row + 1..row + 1 + inputs]
                    .iter()
                    .zip(input)
                    .map(|(w, x)| w * x)
                    .sum::<f64>();
            pre.push(z);
            act.push(z.max(0.0));
        }
        let out = hidden * (inputs + 1);
        let logit = params[out]
            + params[out + 1..out + 1 + hidden]
                .iter()
                .zip(&act)
                .map(|(w, h)| w * h)
                .sum::<f64>();
        (pre, act, logit)
    }

    /// Gradient of the mean loss with respect to the flat parameters
    fn gradient(&self, params: &[f64]) -> Vec<f64> {
        let inputs = self.topology.input_width();
        let hidden = self.topology.hidden_neurons();
        let out = hidden * (inputs + 1);
        let scale = 1.0 / self.domain.len() as f64;
        let mut grad = vec![0.0; params.len()];

        for sample in self.domain.samples() {
            let (pre, act, logit) = self.forward(params, &sample.input);
            let d_logit = (sigmoid(logit) - f64::from(sample.expected)) * scale;

            grad[out] += d_logit;
            for n in 0..hidden {
                grad[out + 1 + n] += d_logit * act[n];
                if pre[n] <= 0.0 {
                    continue;
                }
                let d_pre = d_logit * params[out + 1 + n];
                let row = n * (inputs + 1);
                grad[row] += d_pre;
                for (i, x) in sample.input.iter().enumerate() {
                    grad[row + 1 + i] += d_pre * x;
                }
            }
        }
        grad
    }

    fn unflatten(&self, params: &[f64]) -> WeightSet {
        let inputs = self.topology.input_width();
        let hidden = self.topology.hidden_neurons();
        let rows: Vec<&[f64]> = params[..hidden * (inputs + 1)]
            .chunks(inputs + 1)
            .collect();
        let out = &params[hidden * (inputs + 1)..];
        WeightSet::new(
            rows.iter().map(|r| r[1..].to_vec()).collect(),
            rows.iter().map(|r| r[0]).collect(),
            vec![out[1..].to_vec()],
            vec![out[0]],
        )
    }
}

impl Trainer for MlpTrainer {
    fn train(&self, seed: u64, params: &TrainingParams) -> WeightSet {
        let mut theta = self.init_params(seed);
        let mut m = vec![0.0; theta.len()];
        let mut v = vec![0.0; theta.len()];

        for step in 1..=params.epochs {
            let grad = self.gradient(&theta);
            let bias1 = bias_correction(BETA1, step);
            let bias2 = bias_correction(BETA2, step);
            for k in 0..theta.len() {
                m[k] = BETA1 * m[k] + (1.0 - BETA1) * grad[k];
                v[k] = BETA2 * v[k] + (1.0 - BETA2) * grad[k] * grad[k];
                let m_hat = m[k] / bias1;
                let v_hat = v[k] / bias2;
                theta[k] -= params.learning_rate * m_hat / (v_hat.sqrt() + EPSILON);
            }
        }
        self.unflatten(&theta)
    }
}

/// Adam bias-correction denominator `1 - beta^step`, valid for any `u32` step
#[inline]
fn bias_correction(beta: f64, step: u32) -> f64 {
    1.0 - beta.powf(f64::from(step))
}

#[inline]
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Numerically stable BCE on a logit
#[inline]
fn bce_with_logits(logit: f64, target: f64) -> f64 {
    logit.max(0.0) - logit * target + (-logit.abs()).exp().ln_1p()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trainer() -> MlpTrainer {
        MlpTrainer::new(Topology::xor())
    }

    #[test]
    fn test_default_params() {
        let p = TrainingParams::default();
        assert_eq!(p.learning_rate, 0.05);
        assert_eq!(p.epochs, 2000);
    }

    #[test]
    fn test_training_is_deterministic() {
        let params = TrainingParams {
            learning_rate: 0.05,
            epochs: 50,
        };
        let t = trainer();
        assert_eq!(t.train(7, &params), t.train(7, &params));
        assert_ne!(t.train(7, &params), t.train(8, &params));
    }

    #[test]
    fn test_init_respects_fan_in_bounds() {
        let t = MlpTrainer::new(Topology::new(2, 4).unwrap());
        let w = t.initial_weights(3);
        assert!(w.check_shape(t.topology()).is_ok());
        let hidden_bound = 1.0 / 2f64.sqrt();
        let output_bound = 1.0 / 4f64.sqrt();
        assert!(w.w1().iter().flatten().all(|v| v.abs() <= hidden_bound));
        assert!(w.b1().iter().all(|v| v.abs() <= hidden_bound));
        assert!(w.w2().iter().flatten().all(|v| v.abs() <= output_bound));
        assert!(w.b2()[0].abs() <= output_bound);
    }

    #[test]
    fn test_zero_epochs_returns_initial_weights() {
        let params = TrainingParams {
            learning_rate: 0.05,
            epochs: 0,
        };
        let t = trainer();
        assert_eq!(t.train(11, &params), t.initial_weights(11));
    }

    #[test]
    fn test_training_reduces_loss() {
        let t = trainer();
        let params = TrainingParams {
            learning_rate: 0.05,
            epochs: 200,
        };
        let before = t.mean_loss(&t.initial_weights(0)).unwrap();
        let after = t.mean_loss(&t.train(0, &params)).unwrap();
        assert!(after < before, "loss {} -> {}", before, after);
    }

    #[test]
    fn test_loss_of_mismatched_weights_is_none() {
        let wide = WeightSet::zeros(&Topology::new(3, 2).unwrap());
        assert_eq!(trainer().mean_loss(&wide), None);
    }

    #[test]
    fn test_bce_is_stable_for_large_logits() {
        assert!(bce_with_logits(1000.0, 1.0) < 1e-12);
        assert!((bce_with_logits(-1000.0, 1.0) - 1000.0).abs() < 1e-9);
        assert!((bce_with_logits(0.0, 0.0) - std::f64::consts::LN_2).abs() < 1e-12);
        assert_eq!(sigmoid(0.0), 0.5);
    }

    #[test]
    fn test_bias_correction_beyond_i32_steps() {
        assert!((bias_correction(BETA1, 1) - 0.1).abs() < 1e-12);
        for step in [i32::MAX as u32, i32::MAX as u32 + 1, u32::MAX] {
            let c1 = bias_correction(BETA1, step);
            let c2 = bias_correction(BETA2, step);
            assert!(c1 > 0.0 && c1 <= 1.0, "step {} -> {}", step, c1);
            assert!(c2 > 0.0 && c2 <= 1.0, "step {} -> {}", step, c2);
        }
    }

    #[test]
    fn test_closures_are_trainers() {
        let fixed = |_seed: u64, _p: &TrainingParams| WeightSet::zeros(&Topology::xor());
        assert_eq!(
            fixed.train(1, &TrainingParams::default()),
            WeightSet::zeros(&Topology::xor())
        );
    }
}
