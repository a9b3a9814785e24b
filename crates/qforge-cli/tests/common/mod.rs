// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities and helpers

#![allow(dead_code)]

use qforge_network::WeightSet;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Hand-built ReLU XOR network with margin 0.5 on every corner
pub fn relu_xor() -> WeightSet {
    WeightSet::new(
        vec![vec![1.0, 1.0], vec![1.0, 1.0]],
        vec![0.0, -1.0],
        vec![vec![1.0, -2.0]],
        vec![-0.5],
    )
}

/// Correct in float, wrong after Q16.16 quantization
pub fn fragile_xor() -> WeightSet {
    WeightSet::new(
        vec![vec![1.0, 1.0], vec![1.0, 1.0]],
        vec![0.0, -1.0],
        vec![vec![1.0, -2.0]],
        vec![-1.0 + 0.3 / 65536.0],
    )
}

/// Write `weights` as JSON into `dir` and return the path
pub fn write_weights(dir: &TempDir, name: &str, weights: &WeightSet) -> PathBuf {
    let path = dir.path().join(name);
    qforge_cli::save_weights(&path, weights).expect("Failed to write weights");
    path
}
