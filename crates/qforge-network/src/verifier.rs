// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Accuracy Verifier
//!
//! Runs the emulator over the complete evaluation domain in both modes and
//! records every sample. Rejecting a weight set is the common outcome of a
//! search, so it is an ordinary boolean on the report, never an error.
//!
//! ## Evaluation domain
//!
//! Every corner of the binary input cube, labelled with its parity. For the
//! reference two-input network this is the XOR truth table, in order:
//!
//! ```text
//! (0,0) -> 0   (0,1) -> 1   (1,0) -> 1   (1,1) -> 0
//! ```

use serde::Serialize;
use tracing::trace;

use crate::emulator::{HardwareEmulator, Mode};
use crate::error::NetworkResult;
use crate::weights::WeightSet;

/// One (input, expected label) pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationSample {
    pub input: Vec<f64>,
    pub expected: u8,
}

/// Fixed, exhaustive set of samples every verification pass covers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationDomain {
    input_width: usize,
    samples: Vec<EvaluationSample>,
}

impl EvaluationDomain {
    /// All 2^width binary corners, first input as most significant bit,
    /// labelled with the parity of the set bits
    pub fn parity(input_width: usize) -> Self {
        let samples = (0..1usize << input_width)
            .map(|corner| {
                let input = (0..input_width)
                    .map(|k| ((corner >> (input_width - 1 - k)) & 1) as f64)
                    .collect();
                EvaluationSample {
                    input,
                    expected: (corner.count_ones() % 2) as u8,
                }
            })
            .collect();
        Self {
            input_width,
            samples,
        }
    }

    /// The four XOR corners
    pub fn xor() -> Self {
        Self::parity(2)
    }

    #[inline]
    pub fn input_width(&self) -> usize {
        self.input_width
    }

    #[inline]
    pub fn samples(&self) -> &[EvaluationSample] {
        &self.samples
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// What the emulator computed for one sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleRecord {
    pub input: Vec<f64>,
    pub logit: f64,
    pub label: u8,
    pub expected: u8,
}

impl SampleRecord {
    #[inline]
    pub fn is_correct(&self) -> bool {
        self.label == self.expected
    }
}

/// Per-mode verification result, in domain order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationReport {
    mode: Mode,
    records: Vec<SampleRecord>,
    all_correct: bool,
}

impl VerificationReport {
    fn new(mode: Mode, records: Vec<SampleRecord>) -> Self {
        let all_correct = records.iter().all(SampleRecord::is_correct);
        Self {
            mode,
            records,
            all_correct,
        }
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn records(&self) -> &[SampleRecord] {
        &self.records
    }

    /// Exact label match on every sample (logits do not gate this)
    #[inline]
    pub fn all_correct(&self) -> bool {
        self.all_correct
    }

    pub fn correct_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_correct()).count()
    }

    pub fn labels(&self) -> Vec<u8> {
        self.records.iter().map(|r| r.label).collect()
    }
}

/// Both reports for one weight set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verification {
    pub float: VerificationReport,
    pub quantized: VerificationReport,
}

impl Verification {
    pub fn report(&self, mode: Mode) -> &VerificationReport {
        match mode {
            Mode::Float => &self.float,
            Mode::Quantized => &self.quantized,
        }
    }

    /// Float-correct weights that the fixed-point datapath gets wrong
    pub fn lost_in_quantization(&self) -> bool {
        self.float.all_correct() && !self.quantized.all_correct()
    }
}

/// Exhaustive accuracy check over the parity domain of the emulator topology
#[derive(Debug, Clone)]
pub struct AccuracyVerifier {
    emulator: HardwareEmulator,
    domain: EvaluationDomain,
}

impl AccuracyVerifier {
    pub fn new(emulator: HardwareEmulator) -> Self {
        let domain = EvaluationDomain::parity(emulator.topology().input_width());
        Self { emulator, domain }
    }

    #[inline]
    pub fn emulator(&self) -> &HardwareEmulator {
        &self.emulator
    }

    #[inline]
    pub fn domain(&self) -> &EvaluationDomain {
        &self.domain
    }

    /// Verify `weights` in float and quantized mode
    ///
    /// # Errors
    ///
    /// Only `NetworkError::OutOfDomainShape`, for a malformed weight set.
    pub fn verify(&self, weights: &WeightSet) -> NetworkResult<Verification> {
        Ok(Verification {
            float: self.verify_mode(Mode::Float, weights)?,
            quantized: self.verify_mode(Mode::Quantized, weights)?,
        })
    }

    /// Verify a single mode over the whole domain
    pub fn verify_mode(&self, mode: Mode, weights: &WeightSet) -> NetworkResult<VerificationReport> {
        let records = self
            .domain
            .samples()
            .iter()
            .map(|sample| {
                let out = self.emulator.forward(mode, weights, &sample.input)?;
                Ok(SampleRecord {
                    input: sample.input.clone(),
                    logit: out.logit,
                    label: out.label,
                    expected: sample.expected,
                })
            })
            .collect::<NetworkResult<Vec<_>>>()?;
        let report = VerificationReport::new(mode, records);
        trace!(
            target: "qforge-network",
            "{} pass: {}/{} correct",
            mode,
            report.correct_count(),
            report.records().len()
        );
        Ok(report)
    }
}
