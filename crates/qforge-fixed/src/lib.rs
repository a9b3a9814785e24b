// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Fixed-Point Codec
//!
//! Converts real values to and from the signed fixed-point representation
//! used by the hardware datapath (Q16.16 in the reference deployment).
//!
//! ```text
//! S   = 2^fractional_bits
//! MIN = -2^(integer_bits - 1)
//! MAX =  2^(integer_bits - 1) - 1/S
//!
//! quantize(x) = clamp(round_half_away(x * S) / S, MIN, MAX)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use qforge_fixed::{FixedPointCodec, FixedPointFormat};
//!
//! let codec = FixedPointCodec::new(FixedPointFormat::Q16_16);
//! assert_eq!(codec.quantize(0.5), 0.5);
//! assert_eq!(codec.quantize(1.0e9), FixedPointFormat::Q16_16.max_value());
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod codec;
pub mod error;
pub mod format;

pub use codec::FixedPointCodec;
pub use error::{FixedPointError, Result};
pub use format::FixedPointFormat;
