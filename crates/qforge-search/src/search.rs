// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Training Search Loop
//!
//! Trains one candidate per seed and keeps the first whose fixed-point
//! forward pass classifies the whole domain correctly.
//!
//! ```text
//!            ┌──────────────────── seed + 1 ─────────────────────┐
//!            ▼                                                   │
//!   Searching(seed) ──► Trained ──► Verified ──┬──► Rejected ────┘
//!        │                                     └──► Accepted   (terminal)
//!        └── seed == start + retry_limit ─────────► Exhausted  (terminal)
//! ```
//!
//! Only the quantized report decides acceptance; the float report is
//! logged but not required. Exhaustion is an ordinary outcome.

use qforge_network::{AccuracyVerifier, Verification, WeightSet};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{SearchError, SearchResult};
use crate::report::log_verification;
use crate::trainer::{Trainer, TrainingParams};

/// Default number of seeds tried before giving up
pub const RETRY_LIMIT: u64 = 100;

/// Seed window and hyperparameters of one search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub start_seed: u64,
    pub retry_limit: u64,
    /// Seeds evaluated in parallel per batch by [`TrainingSearchLoop::search`]
    pub batch_size: usize,
    pub training: TrainingParams,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            start_seed: 0,
            retry_limit: RETRY_LIMIT,
            batch_size: 1,
            training: TrainingParams::default(),
        }
    }
}

impl SearchConfig {
    /// One past the last seed tried
    #[inline]
    pub fn end_seed(&self) -> u64 {
        self.start_seed.saturating_add(self.retry_limit)
    }
}

/// State of the search machine
#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    Searching {
        seed: u64,
    },
    Trained {
        seed: u64,
        weights: WeightSet,
    },
    Verified {
        seed: u64,
        weights: WeightSet,
        verification: Verification,
    },
    Rejected {
        seed: u64,
    },
    Accepted {
        seed: u64,
        weights: WeightSet,
        verification: Verification,
    },
    Exhausted,
}

impl SearchState {
    pub fn name(&self) -> &'static str {
        match self {
            SearchState::Searching { .. } => "searching",
            SearchState::Trained { .. } => "trained",
            SearchState::Verified { .. } => "verified",
            SearchState::Rejected { .. } => "rejected",
            SearchState::Accepted { .. } => "accepted",
            SearchState::Exhausted => "exhausted",
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, SearchState::Accepted { .. } | SearchState::Exhausted)
    }
}

/// Final result of a search
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Accepted {
        seed: u64,
        weights: WeightSet,
        verification: Verification,
        /// Seeds consumed up to and including the accepted one
        attempts: u64,
    },
    Exhausted {
        attempts: u64,
    },
}

/// Accepted weight set, unpacked from [`SearchOutcome::Accepted`]
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedWeights {
    pub seed: u64,
    pub weights: WeightSet,
    pub verification: Verification,
    pub attempts: u64,
}

impl SearchOutcome {
    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, SearchOutcome::Accepted { .. })
    }

    pub fn attempts(&self) -> u64 {
        match self {
            SearchOutcome::Accepted { attempts, .. } | SearchOutcome::Exhausted { attempts } => {
                *attempts
            }
        }
    }

    /// Turn exhaustion into [`SearchError::SearchExhausted`]
    pub fn into_accepted(self) -> SearchResult<AcceptedWeights> {
        match self {
            SearchOutcome::Accepted {
                seed,
                weights,
                verification,
                attempts,
            } => Ok(AcceptedWeights {
                seed,
                weights,
                verification,
                attempts,
            }),
            SearchOutcome::Exhausted { attempts } => Err(SearchError::SearchExhausted { attempts }),
        }
    }
}

/// Seeded train-verify loop
pub struct TrainingSearchLoop<T: Trainer> {
    trainer: T,
    verifier: AccuracyVerifier,
    config: SearchConfig,
}

impl<T: Trainer> TrainingSearchLoop<T> {
    pub fn new(trainer: T, verifier: AccuracyVerifier, config: SearchConfig) -> Self {
        Self {
            trainer,
            verifier,
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[inline]
    pub fn trainer(&self) -> &T {
        &self.trainer
    }

    /// Sequential search, or batched when `batch_size > 1`
    pub fn search(&self) -> SearchResult<SearchOutcome> {
        if self.config.batch_size > 1 {
            self.run_batched(self.config.batch_size)
        } else {
            self.run()
        }
    }

    /// Advance the machine by one transition; terminal states are returned unchanged
    ///
    /// Pure apart from a debug trace; per-seed verdicts are logged by the
    /// drivers ([`run`](Self::run), [`run_batched`](Self::run_batched)) in
    /// seed order.
    ///
    /// # Errors
    ///
    /// `SearchError::Network` if a trained weight set does not fit the topology.
    pub fn step(&self, state: SearchState) -> SearchResult<SearchState> {
        let next = match state {
            SearchState::Searching { seed } if seed >= self.config.end_seed() => {
                SearchState::Exhausted
            }
            SearchState::Searching { seed } => SearchState::Trained {
                seed,
                weights: self.trainer.train(seed, &self.config.training),
            },
            SearchState::Trained { seed, weights } => {
                let verification = self.verifier.verify(&weights)?;
                SearchState::Verified {
                    seed,
                    weights,
                    verification,
                }
            }
            SearchState::Verified {
                seed,
                weights,
                verification,
            } => {
                if verification.quantized.all_correct() {
                    SearchState::Accepted {
                        seed,
                        weights,
                        verification,
                    }
                } else {
                    SearchState::Rejected { seed }
                }
            }
            SearchState::Rejected { seed } => SearchState::Searching { seed: seed + 1 },
            terminal => terminal,
        };
        debug!(target: "qforge-search", "state -> {}", next.name());
        Ok(next)
    }

    /// Sequential search over `[start_seed, start_seed + retry_limit)`
    pub fn run(&self) -> SearchResult<SearchOutcome> {
        info!(
            target: "qforge-search",
            "Searching seeds {}..{} (lr={}, epochs={})",
            self.config.start_seed,
            self.config.end_seed(),
            self.config.training.learning_rate,
            self.config.training.epochs
        );
        let mut state = SearchState::Searching {
            seed: self.config.start_seed,
        };
        while !state.is_terminal() {
            if let SearchState::Verified {
                seed, verification, ..
            } = &state
            {
                log_verification(*seed, verification);
            }
            state = self.step(state)?;
        }
        Ok(self.finish(state))
    }

    /// Parallel search in batches of `batch_size` seeds
    ///
    /// Each batch is trained and verified with rayon. Decisions are then
    /// taken in seed order on the calling thread and stop at the first
    /// accepted seed, so both the outcome and the logged verdicts equal
    /// [`run`](Self::run).
    pub fn run_batched(&self, batch_size: usize) -> SearchResult<SearchOutcome> {
        let batch_size = batch_size.max(1) as u64;
        let end = self.config.end_seed();
        info!(
            target: "qforge-search",
            "Searching seeds {}..{} in batches of {}",
            self.config.start_seed,
            end,
            batch_size
        );

        let mut batch_start = self.config.start_seed;
        while batch_start < end {
            let batch_end = batch_start.saturating_add(batch_size).min(end);
            let seeds: Vec<u64> = (batch_start..batch_end).collect();
            let results: Vec<SearchResult<SearchState>> = seeds
                .par_iter()
                .map(|&seed| {
                    let mut state = SearchState::Searching { seed };
                    while !matches!(state, SearchState::Verified { .. }) && !state.is_terminal() {
                        state = self.step(state)?;
                    }
                    Ok(state)
                })
                .collect();
            debug!(target: "qforge-search", "batch {}..{} evaluated", batch_start, batch_end);

            for result in results {
                let verified = result?;
                if let SearchState::Verified {
                    seed, verification, ..
                } = &verified
                {
                    log_verification(*seed, verification);
                }
                let decided = self.step(verified)?;
                if decided.is_terminal() {
                    return Ok(self.finish(decided));
                }
            }
            batch_start = batch_end;
        }
        Ok(self.finish(SearchState::Exhausted))
    }

    fn finish(&self, state: SearchState) -> SearchOutcome {
        match state {
            SearchState::Accepted {
                seed,
                weights,
                verification,
            } => {
                let attempts = seed - self.config.start_seed + 1;
                info!(
                    target: "qforge-search",
                    "✅ Seed {} accepted after {} attempt(s)", seed, attempts
                );
                SearchOutcome::Accepted {
                    seed,
                    weights,
                    verification,
                    attempts,
                }
            }
            _ => {
                let attempts = self.config.end_seed() - self.config.start_seed;
                warn!(
                    target: "qforge-search",
                    "No seed in {}..{} survived quantization; try more epochs or a lower learning rate",
                    self.config.start_seed,
                    self.config.end_seed()
                );
                SearchOutcome::Exhausted { attempts }
            }
        }
    }
}
