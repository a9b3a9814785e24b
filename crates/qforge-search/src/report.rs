// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Verification diagnostics
//!
//! Verification results are plain values; this module turns them into log
//! events or text for whoever wants to see them.

use qforge_network::{Mode, SampleRecord, Verification, VerificationReport};
use tracing::{debug, info};

/// Emit one event per sample and a verdict per mode
pub fn log_verification(seed: u64, verification: &Verification) {
    for report in [&verification.float, &verification.quantized] {
        for record in report.records() {
            debug!(
                target: "qforge-search",
                seed,
                mode = %report.mode(),
                input = ?record.input,
                logit = record.logit,
                label = record.label,
                expected = record.expected,
                "sample"
            );
        }
    }
    info!(
        target: "qforge-search",
        "Seed {}: acc_float={}, acc_quant={}",
        seed,
        verification.float.all_correct(),
        verification.quantized.all_correct()
    );
}

/// Human-readable rendering of both reports
pub fn format_verification(verification: &Verification) -> String {
    let mut out = String::new();
    for mode in [Mode::Float, Mode::Quantized] {
        out.push_str(&format_report(verification.report(mode)));
    }
    out
}

fn format_report(report: &VerificationReport) -> String {
    let mut out = format!(
        "{} verification: {}/{} correct{}\n",
        report.mode(),
        report.correct_count(),
        report.records().len(),
        if report.all_correct() { "" } else { " (FAILED)" }
    );
    for record in report.records() {
        out.push_str("  ");
        out.push_str(&format_record(record));
        out.push('\n');
    }
    out
}

fn format_record(record: &SampleRecord) -> String {
    let input: Vec<String> = record.input.iter().map(|v| format!("{}", v)).collect();
    format!(
        "x=[{}], logit={:.6}, y={}, expected={}",
        input.join(", "),
        record.logit,
        record.label,
        record.expected
    )
}
