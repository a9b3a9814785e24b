// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # qforge-observability
//!
//! Logging infrastructure shared by the qforge binaries, with per-crate
//! debug flag support.
//!
//! Library crates only emit `tracing` events with their crate name as the
//! target; installing a subscriber is left to the binary through
//! [`init_logging`].

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

pub use cli::*;
pub use config::*;
pub use init::*;

/// Log targets that accept `--debug-<name>`
pub const KNOWN_CRATES: &[&str] = &[
    "qforge-network",
    "qforge-search",
    "qforge-render",
    "qforge-config",
    "qforge-cli",
];
