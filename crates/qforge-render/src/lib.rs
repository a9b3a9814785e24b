// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Constant-Table Rendering
//!
//! Turns a [`RenderRequest`] (constant names, neurons per layer and the
//! quantized values in hardware order) into source text for the target
//! toolchain. Renderers never reorder or re-quantize values.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod request;
pub mod vhdl;

pub use error::{RenderError, RenderResult};
pub use request::{RenderRequest, DEFAULT_CONSTANT_NAME, DEFAULT_LAYER_CONSTANT_NAME};
pub use vhdl::{is_vhdl_identifier, vhdl_real, VhdlRenderer};

/// Output-format seam for weight constant tables
pub trait ConstantTableRenderer {
    /// Render `request` as a complete source fragment
    ///
    /// Output is deterministic for a given request.
    fn render(&self, request: &RenderRequest) -> RenderResult<String>;

    /// Conventional file extension of the rendered fragment
    fn file_extension(&self) -> &'static str;
}
