// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Network shape errors

use thiserror::Error;

/// Errors raised by the emulator, verifier and emitter
///
/// A failed verification is not an error; it is reported through
/// [`VerificationReport::all_correct`](crate::VerificationReport::all_correct).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// A matrix/vector dimension disagrees with the expected topology
    #[error("Out-of-domain shape for {what}: expected {expected}, got {actual}")]
    OutOfDomainShape {
        what: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid topology: {0}")]
    InvalidTopology(String),
}

impl NetworkError {
    pub(crate) fn shape(what: impl Into<String>, expected: usize, actual: usize) -> Self {
        NetworkError::OutOfDomainShape {
            what: what.into(),
            expected,
            actual,
        }
    }
}

/// Result type for network operations
pub type NetworkResult<T> = Result<T, NetworkError>;
