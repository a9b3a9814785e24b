// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Subcommand implementations
//!
//! Each command returns what should go to stdout plus an exit status, so
//! the binary stays a thin shell around these functions.

use anyhow::{Context, Result};
use qforge_config::QforgeConfig;
use qforge_network::{AccuracyVerifier, HardwareEmulator, WeightEmitter, WeightSet};
use qforge_render::{ConstantTableRenderer, RenderRequest, VhdlRenderer};
use qforge_search::{
    format_verification, MlpTrainer, SearchOutcome, Trainer, TrainingSearchLoop,
};
use std::path::Path;
use tracing::{info, warn};

use crate::weights_io::{load_weights, save_weights, write_or_return};

/// How a command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Success,
    /// Weights fail in the fixed-point datapath
    Rejected,
    /// No seed in the window survived quantization
    Exhausted,
}

impl CommandOutcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            CommandOutcome::Success => 0,
            CommandOutcome::Rejected => 1,
            CommandOutcome::Exhausted => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandReport {
    pub outcome: CommandOutcome,
    /// Text for stdout (empty when written to a file)
    pub stdout: String,
}

/// Advice printed when the search runs out of seeds
pub const EXHAUSTED_ADVICE: &str = "Try increasing epochs or reducing the learning rate.";

fn verifier(config: &QforgeConfig) -> Result<AccuracyVerifier> {
    let topology = config.topology.topology()?;
    let codec = config.fixed_point.codec()?;
    Ok(AccuracyVerifier::new(HardwareEmulator::new(topology, codec)))
}

/// Quantize, flatten and render `weights` with the configured names
pub fn render_weights(config: &QforgeConfig, weights: &WeightSet) -> Result<String> {
    let emitter = WeightEmitter::new(config.topology.topology()?, config.fixed_point.codec()?);
    let table = emitter
        .emit(weights)
        .context("Weights do not fit the configured topology")?;
    let request = RenderRequest::named(
        config.emit.constant_name.as_str(),
        config.emit.layer_constant_name.as_str(),
        &table,
    );
    Ok(VhdlRenderer.render(&request)?)
}

/// `qforge search` with the reference trainer
pub fn search(
    config: &QforgeConfig,
    weights_out: Option<&Path>,
    output: Option<&Path>,
) -> Result<CommandReport> {
    let trainer = MlpTrainer::new(config.topology.topology()?);
    search_with(config, trainer, weights_out, output)
}

/// `qforge search` with any trainer
pub fn search_with<T: Trainer>(
    config: &QforgeConfig,
    trainer: T,
    weights_out: Option<&Path>,
    output: Option<&Path>,
) -> Result<CommandReport> {
    let search = TrainingSearchLoop::new(trainer, verifier(config)?, config.search_config());
    match search.search()? {
        SearchOutcome::Accepted {
            seed,
            weights,
            verification,
            attempts,
        } => {
            info!(
                target: "qforge-cli",
                "Weights approved after Q{}.{} quantization (seed {}, {} attempt(s))",
                config.fixed_point.integer_bits,
                config.fixed_point.fractional_bits,
                seed,
                attempts
            );
            if !verification.float.all_correct() {
                warn!(target: "qforge-cli", "Accepted weights are only exact in fixed point");
            }
            if let Some(path) = weights_out {
                save_weights(path, &weights)?;
                info!(target: "qforge-cli", "Wrote weights to {}", path.display());
            }
            let table = render_weights(config, &weights)?;
            Ok(CommandReport {
                outcome: CommandOutcome::Success,
                stdout: write_or_return(output, table)?,
            })
        }
        SearchOutcome::Exhausted { attempts } => {
            warn!(target: "qforge-cli", "{} seeds tried. {}", attempts, EXHAUSTED_ADVICE);
            Ok(CommandReport {
                outcome: CommandOutcome::Exhausted,
                stdout: format!("{}\n", EXHAUSTED_ADVICE),
            })
        }
    }
}

/// `qforge verify`
pub fn verify(config: &QforgeConfig, weights_path: &Path) -> Result<CommandReport> {
    let weights = load_weights(weights_path)?;
    let verification = verifier(config)?
        .verify(&weights)
        .with_context(|| format!("{} does not fit the configured topology", weights_path.display()))?;
    let outcome = if verification.quantized.all_correct() {
        CommandOutcome::Success
    } else {
        CommandOutcome::Rejected
    };
    Ok(CommandReport {
        outcome,
        stdout: format_verification(&verification),
    })
}

/// `qforge emit`
pub fn emit(config: &QforgeConfig, weights_path: &Path, output: Option<&Path>) -> Result<CommandReport> {
    let weights = load_weights(weights_path)?;
    let table = render_weights(config, &weights)?;
    if let Some(path) = output {
        info!(target: "qforge-cli", "Writing constant table to {}", path.display());
    }
    Ok(CommandReport {
        outcome: CommandOutcome::Success,
        stdout: write_or_return(output, table)?,
    })
}
