// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Command implementations against real files

mod common;

use common::{create_temp_dir, fragile_xor, relu_xor, write_weights};
use qforge_cli::{commands, load_weights, CommandOutcome, EXHAUSTED_ADVICE};
use qforge_config::QforgeConfig;
use qforge_network::{Topology, WeightSet};
use qforge_search::TrainingParams;

#[test]
fn test_verify_accepts_robust_weights() {
    let dir = create_temp_dir();
    let path = write_weights(&dir, "xor.json", &relu_xor());

    let report = commands::verify(&QforgeConfig::default(), &path).unwrap();
    assert_eq!(report.outcome, CommandOutcome::Success);
    assert_eq!(report.outcome.exit_code(), 0);
    assert!(report.stdout.contains("quantized verification: 4/4 correct"));
}

#[test]
fn test_verify_rejects_fragile_weights() {
    let dir = create_temp_dir();
    let path = write_weights(&dir, "fragile.json", &fragile_xor());

    let report = commands::verify(&QforgeConfig::default(), &path).unwrap();
    assert_eq!(report.outcome, CommandOutcome::Rejected);
    assert_eq!(report.outcome.exit_code(), 1);
    assert!(report.stdout.contains("float verification: 4/4 correct"));
    assert!(report.stdout.contains("(FAILED)"));
}

#[test]
fn test_verify_reports_shape_mismatch() {
    let dir = create_temp_dir();
    let path = write_weights(&dir, "wide.json", &WeightSet::zeros(&Topology::new(2, 3).unwrap()));
    let err = commands::verify(&QforgeConfig::default(), &path).unwrap_err();
    assert!(format!("{:#}", err).contains("Out-of-domain shape"));
}

#[test]
fn test_emit_to_stdout_and_file() {
    let dir = create_temp_dir();
    let path = write_weights(&dir, "xor.json", &relu_xor());
    let config = QforgeConfig::default();

    let report = commands::emit(&config, &path, None).unwrap();
    assert!(report
        .stdout
        .starts_with("constant NEURONS_PER_LAYER_C : integer_array(0 to 1) := (2, 1);\n"));
    assert!(report.stdout.ends_with("  to_sfixed_a(-2.0)\n);\n"));

    let out = dir.path().join("weights.vhd");
    let to_file = commands::emit(&config, &path, Some(&out)).unwrap();
    assert!(to_file.stdout.is_empty());
    assert_eq!(std::fs::read_to_string(&out).unwrap(), report.stdout);
}

#[test]
fn test_emit_uses_configured_names() {
    let dir = create_temp_dir();
    let path = write_weights(&dir, "xor.json", &relu_xor());
    let mut config = QforgeConfig::default();
    config.emit.constant_name = "XOR_W".to_string();

    let report = commands::emit(&config, &path, None).unwrap();
    assert!(report.stdout.contains("constant XOR_W : sfixed_bus_array(0 to 8) := ("));
}

#[test]
fn test_missing_weight_file_is_an_error() {
    let dir = create_temp_dir();
    let err = commands::emit(&QforgeConfig::default(), &dir.path().join("nope.json"), None)
        .unwrap_err();
    assert!(format!("{}", err).contains("Failed to read weight file"));
}

#[test]
fn test_search_writes_weights_and_table() {
    let dir = create_temp_dir();
    let weights_out = dir.path().join("accepted.json");
    let trainer = |_seed: u64, _p: &TrainingParams| relu_xor();

    let report = commands::search_with(&QforgeConfig::default(), trainer, Some(&weights_out), None)
        .unwrap();
    assert_eq!(report.outcome, CommandOutcome::Success);
    assert!(report.stdout.contains("to_sfixed_a(-0.5),"));
    assert_eq!(load_weights(&weights_out).unwrap(), relu_xor());
}

#[test]
fn test_search_exhaustion_exits_with_two() {
    let mut config = QforgeConfig::default();
    config.search.retry_limit = 3;
    let trainer = |_seed: u64, _p: &TrainingParams| fragile_xor();

    let report = commands::search_with(&config, trainer, None, None).unwrap();
    assert_eq!(report.outcome, CommandOutcome::Exhausted);
    assert_eq!(report.outcome.exit_code(), 2);
    assert_eq!(report.stdout.trim(), EXHAUSTED_ADVICE);
}
