// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Search error types

use qforge_network::NetworkError;
use thiserror::Error;

/// Errors surfaced by the training search
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// Every seed in the window was rejected. Only produced on request via
    /// [`crate::SearchOutcome::into_accepted`]; the loop itself reports
    /// exhaustion as an outcome.
    #[error(
        "No quantization-robust weights after {attempts} attempts; try more epochs or a lower learning rate"
    )]
    SearchExhausted { attempts: u64 },

    /// A trained weight set did not fit the topology
    #[error(transparent)]
    Network(#[from] NetworkError),
}

pub type SearchResult<T> = Result<T, SearchError>;
