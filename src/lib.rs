// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # qforge - quantization-robust weights for fixed-point hardware
//!
//! Trains small ReLU networks seed by seed, re-runs each candidate through a
//! bit-accurate emulation of the fixed-point datapath, and emits the first
//! weight set that survives quantization as a VHDL constant table.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! qforge = "0.0.1-beta.18"  # Default: all components
//! ```
//!
//! ## Feature Flags
//!
//! - **`full`** (default): All components
//! - **`search`**: Seeded training and the verify/retry loop
//! - **`render`**: VHDL constant tables
//! - **`config`**: TOML configuration (implies `search` and `render`)
//!
//! Without features only the codec and the network emulator are built.
//!
//! ## Usage
//!
//! ```rust
//! use qforge::prelude::*;
//!
//! let topology = Topology::xor();
//! let codec = FixedPointCodec::q16_16();
//! let weights = WeightSet::new(
//!     vec![vec![1.0, 1.0], vec![1.0, 1.0]],
//!     vec![0.0, -1.0],
//!     vec![vec![1.0, -2.0]],
//!     vec![-0.5],
//! );
//!
//! let verifier = AccuracyVerifier::new(HardwareEmulator::new(topology.clone(), codec));
//! assert!(verifier.verify(&weights)?.quantized.all_correct());
//!
//! let table = WeightEmitter::new(topology, codec).emit(&weights)?;
//! let vhdl = VhdlRenderer.render(&RenderRequest::from_table(&table))?;
//! assert!(vhdl.contains("to_sfixed_a(-0.5)"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: qforge-fixed, qforge-network               │
//! │  (Qm.n codec, topology, emulator, verifier, emitter)    │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Algorithms: qforge-search                              │
//! │  (Seeded trainer, verify/retry state machine)           │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Output: qforge-render                                  │
//! │  (VHDL constant tables)                                 │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! `qforge-config`, `qforge-observability` and the `qforge` binary
//! (`qforge-cli`) sit beside these layers.
//!
//! ## License
//!
//! Apache-2.0

// Re-export foundation
pub use qforge_fixed as fixed;
pub use qforge_network as network;

// Re-export algorithms
#[cfg(feature = "search")]
pub use qforge_search as search;

// Re-export output
#[cfg(feature = "render")]
pub use qforge_render as render;

// Re-export infrastructure
#[cfg(feature = "config")]
pub use qforge_config as config;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::fixed::{FixedPointCodec, FixedPointFormat};
    pub use crate::network::{
        AccuracyVerifier, HardwareEmulator, Mode, Topology, Verification, WeightConstantTable,
        WeightEmitter, WeightSet,
    };

    #[cfg(feature = "search")]
    pub use crate::search::{
        MlpTrainer, SearchConfig, SearchOutcome, Trainer, TrainingParams, TrainingSearchLoop,
    };

    #[cfg(feature = "render")]
    pub use crate::render::{ConstantTableRenderer, RenderRequest, VhdlRenderer};

    #[cfg(feature = "config")]
    pub use crate::config::QforgeConfig;
}
