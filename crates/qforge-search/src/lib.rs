// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Quantization-Robust Training Search
//!
//! Trains candidate networks seed by seed and accepts the first one whose
//! fixed-point forward pass is exactly right on the whole evaluation domain.
//!
//! ## Example
//! ```
//! use qforge_fixed::FixedPointCodec;
//! use qforge_network::{AccuracyVerifier, HardwareEmulator, Topology, WeightSet};
//! use qforge_search::{SearchConfig, SearchOutcome, TrainingParams, TrainingSearchLoop};
//!
//! // Any deterministic `seed -> WeightSet` function is a trainer
//! let trainer = |_seed: u64, _params: &TrainingParams| {
//!     WeightSet::new(
//!         vec![vec![1.0, 1.0], vec![1.0, 1.0]],
//!         vec![0.0, -1.0],
//!         vec![vec![1.0, -2.0]],
//!         vec![-0.5],
//!     )
//! };
//! let verifier = AccuracyVerifier::new(HardwareEmulator::new(
//!     Topology::xor(),
//!     FixedPointCodec::q16_16(),
//! ));
//!
//! let outcome = TrainingSearchLoop::new(trainer, verifier, SearchConfig::default())
//!     .run()
//!     .unwrap();
//! assert!(matches!(outcome, SearchOutcome::Accepted { seed: 0, .. }));
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod report;
pub mod search;
pub mod trainer;

pub use error::{SearchError, SearchResult};
pub use report::{format_verification, log_verification};
pub use search::{
    AcceptedWeights, SearchConfig, SearchOutcome, SearchState, TrainingSearchLoop, RETRY_LIMIT,
};
pub use trainer::{MlpTrainer, Trainer, TrainingParams, DEFAULT_EPOCHS, DEFAULT_LEARNING_RATE};
