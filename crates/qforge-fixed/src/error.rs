// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for fixed-point format construction

use thiserror::Error;

/// Errors raised while building a [`FixedPointFormat`](crate::FixedPointFormat)
///
/// Quantization itself is total and never fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FixedPointError {
    #[error("Invalid fixed-point format Q{integer_bits}.{fractional_bits}: {reason}")]
    InvalidFormat {
        integer_bits: u32,
        fractional_bits: u32,
        reason: &'static str,
    },
}

pub type Result<T> = core::result::Result<T, FixedPointError>;
