// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # VHDL constant tables
//!
//! ```text
//! constant NEURONS_PER_LAYER_C : integer_array(0 to 1) := (2, 1);
//! constant WEIGHTS_C : sfixed_bus_array(0 to 8) := (
//!   to_sfixed_a(-10.0),
//!   ...
//!   to_sfixed_a(-20.0)
//! );
//! ```
//!
//! Reals are written in shortest round-trip form and always carry a decimal
//! point. One-element aggregates need named association (`(0 => x)`) in VHDL.

use tracing::debug;

use crate::error::{RenderError, RenderResult};
use crate::request::RenderRequest;
use crate::ConstantTableRenderer;

/// Renders `integer_array` / `sfixed_bus_array` constants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VhdlRenderer;

impl VhdlRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ConstantTableRenderer for VhdlRenderer {
    fn render(&self, request: &RenderRequest) -> RenderResult<String> {
        for name in [&request.layer_constant_name, &request.constant_name] {
            if !is_vhdl_identifier(name) {
                return Err(RenderError::InvalidIdentifier(name.clone()));
            }
        }
        if request.neurons_per_layer.is_empty() {
            return Err(RenderError::EmptyTable(request.layer_constant_name.clone()));
        }
        if request.values.is_empty() {
            return Err(RenderError::EmptyTable(request.constant_name.clone()));
        }
        if let Some((index, &value)) = request
            .values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite())
        {
            return Err(RenderError::NonFinite { index, value });
        }

        let layers: Vec<String> = request
            .neurons_per_layer
            .iter()
            .map(|n| n.to_string())
            .collect();
        let values = &request.values;

        let mut lines = Vec::with_capacity(values.len() + 3);
        lines.push(format!(
            "constant {} : integer_array(0 to {}) := {};",
            request.layer_constant_name,
            layers.len() - 1,
            aggregate(&layers)
        ));
        lines.push(format!(
            "constant {} : sfixed_bus_array(0 to {}) := (",
            request.constant_name,
            values.len() - 1
        ));
        if values.len() == 1 {
            lines.push(format!("  0 => to_sfixed_a({})", vhdl_real(values[0])));
        } else {
            lines.extend(values.iter().enumerate().map(|(i, v)| {
                let sep = if i + 1 < values.len() { "," } else { "" };
                format!("  to_sfixed_a({}){}", vhdl_real(*v), sep)
            }));
        }
        lines.push(");".to_string());

        let mut out = lines.join("\n");
        out.push('\n');
        debug!(
            target: "qforge-render",
            "Rendered {} ({} values)",
            request.constant_name,
            values.len()
        );
        Ok(out)
    }

    fn file_extension(&self) -> &'static str {
        "vhd"
    }
}

fn aggregate(items: &[String]) -> String {
    match items {
        [single] => format!("(0 => {})", single),
        _ => format!("({})", items.join(", ")),
    }
}

/// Shortest round-trip decimal with a mandatory decimal point
pub fn vhdl_real(value: f64) -> String {
    if value == 0.0 {
        // Drop the sign of -0.0
        return "0.0".to_string();
    }
    let text = format!("{:?}", value);
    if text.contains('.') {
        return text;
    }
    match text.find('e') {
        Some(pos) => format!("{}.0{}", &text[..pos], &text[pos..]),
        None => format!("{}.0", text),
    }
}

/// VHDL basic identifier: letter first, then letters, digits and
/// non-adjacent underscores, no trailing underscore
pub fn is_vhdl_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    let mut previous_underscore = false;
    for c in chars {
        if c == '_' {
            if previous_underscore {
                return false;
            }
            previous_underscore = true;
        } else if c.is_ascii_alphanumeric() {
            previous_underscore = false;
        } else {
            return false;
        }
    }
    !previous_underscore
}
