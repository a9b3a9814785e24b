// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Errors raised while rendering a constant table
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("Invalid identifier '{0}': must start with a letter and contain only letters, digits and single underscores")]
    InvalidIdentifier(String),

    #[error("Constant '{0}' has no values")]
    EmptyTable(String),

    #[error("Value {value} at index {index} is not finite")]
    NonFinite { index: usize, value: f64 },
}

pub type RenderResult<T> = Result<T, RenderError>;
