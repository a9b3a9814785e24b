// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Weight-set JSON files

use anyhow::{Context, Result};
use qforge_network::WeightSet;
use std::fs;
use std::path::Path;

pub fn load_weights(path: &Path) -> Result<WeightSet> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read weight file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid weight JSON in {}", path.display()))
}

pub fn save_weights(path: &Path, weights: &WeightSet) -> Result<()> {
    let json = serde_json::to_string_pretty(weights).context("Failed to serialize weights")?;
    fs::write(path, json + "\n")
        .with_context(|| format!("Failed to write weight file: {}", path.display()))
}

/// Write `text` to `path`, or return it for stdout when no path is given
pub fn write_or_return(path: Option<&Path>, text: String) -> Result<String> {
    match path {
        Some(path) => {
            fs::write(path, &text)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            Ok(String::new())
        }
        None => Ok(text),
    }
}
