// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Hardware Network Emulation
//!
//! Everything that touches a trained weight set after training:
//! - **Topology**: validated input width and neurons per layer
//! - **Weights**: floating-point parameters and their quantized image
//! - **Emulator**: float and fixed-point forward passes (ReLU, linear, sign threshold)
//! - **Verifier**: exhaustive accuracy check over the evaluation domain
//! - **Emitter**: quantized constant table in hardware layout order
//!
//! ## Datapath
//!
//! ```text
//! hidden = max(0, b1 + W1 · x)        (per hidden neuron)
//! logit  = b2 + W2 · hidden
//! label  = 1 if logit > 0 else 0
//! ```
//!
//! In quantized mode `W1`, `b1`, `W2`, `b2` and `x` are each snapped to the
//! fixed-point grid before use. The ReLU output is carried into the output
//! stage at full precision, exactly as the hardware pipeline does.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod emitter;
pub mod emulator;
pub mod error;
pub mod topology;
pub mod verifier;
pub mod weights;

pub use emitter::{WeightConstantTable, WeightEmitter};
pub use emulator::{ForwardOutput, HardwareEmulator, Mode};
pub use error::{NetworkError, NetworkResult};
pub use topology::Topology;
pub use verifier::{
    AccuracyVerifier, EvaluationDomain, EvaluationSample, SampleRecord, Verification,
    VerificationReport,
};
pub use weights::{QuantizedWeightSet, WeightSet};
