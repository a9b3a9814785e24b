// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for CLI argument parsing

use clap::Parser;
use qforge_cli::{Cli, Command};
use qforge_observability::split_debug_args;
use std::path::PathBuf;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args.iter().map(|s| s.to_string())).unwrap()
}

#[test]
fn test_search_flags_become_config_overrides() {
    let cli = parse(&[
        "qforge",
        "search",
        "--lr",
        "0.01",
        "--epochs",
        "4000",
        "--retry-limit",
        "20",
        "--batch-size",
        "4",
    ]);
    let overrides = cli.config_overrides();
    assert_eq!(overrides["learning_rate"], "0.01");
    assert_eq!(overrides["epochs"], "4000");
    assert_eq!(overrides["retry_limit"], "20");
    assert_eq!(overrides["batch_size"], "4");
    assert!(!overrides.contains_key("start_seed"));
    assert!(!overrides.contains_key("log_level"));
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = parse(&["qforge", "verify", "--weights", "w.json", "-v", "--config", "q.toml"]);
    assert!(cli.verbose);
    assert_eq!(cli.config, Some(PathBuf::from("q.toml")));
    assert_eq!(cli.config_overrides()["log_level"], "debug");
    match cli.command {
        Command::Verify(args) => assert_eq!(args.weights, PathBuf::from("w.json")),
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn test_emit_requires_weights() {
    assert!(Cli::try_parse_from(["qforge", "emit"]).is_err());
    let cli = parse(&["qforge", "emit", "-w", "w.json", "-o", "weights.vhd"]);
    match cli.command {
        Command::Emit(args) => assert_eq!(args.output, Some(PathBuf::from("weights.vhd"))),
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn test_debug_flags_never_reach_clap() {
    let raw = ["qforge", "--debug-qforge-search", "search", "--debug-all"]
        .iter()
        .map(|s| s.to_string());
    let (flags, rest) = split_debug_args(raw);
    assert!(flags.is_enabled("qforge-search"));
    assert!(flags.is_enabled("qforge-render"));
    let cli = Cli::try_parse_from(rest).unwrap();
    assert!(matches!(cli.command, Command::Search(_)));
}
