// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! qforge command-line library
//!
//! Exposes argument parsing and command implementations for testing.

pub mod args;
pub mod commands;
pub mod weights_io;

pub use args::{Cli, Command, EmitArgs, SearchArgs, VerifyArgs};
pub use commands::{
    emit, render_weights, search, search_with, verify, CommandOutcome, CommandReport,
    EXHAUSTED_ADVICE,
};
pub use weights_io::{load_weights, save_weights};
