//! Runtime limits and color thresholds.
//!
//! Everything the scanner and formatter need to know about limits lives in a
//! single immutable [`StatuslineConfig`] built once from the command line.

use crate::cli::Args;

pub const DEFAULT_CONTEXT_LIMIT: u64 = 200_000;
pub const DEFAULT_MAX_INPUT_SIZE: usize = 1024 * 1024;
pub const DEFAULT_HIGH_THRESHOLD: f64 = 90.0;
pub const DEFAULT_MEDIUM_THRESHOLD: f64 = 65.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatuslineConfig {
    /// Tokens that count as a full context window
    pub context_limit: u64,
    /// Largest accepted stdin payload in bytes
    pub max_input_size: usize,
    /// Percentages strictly above this are "high"
    pub high_threshold: f64,
    /// Percentages strictly above this (and not high) are "medium"
    pub medium_threshold: f64,
}

impl Default for StatuslineConfig {
    fn default() -> Self {
        Self {
            context_limit: DEFAULT_CONTEXT_LIMIT,
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
            high_threshold: DEFAULT_HIGH_THRESHOLD,
            medium_threshold: DEFAULT_MEDIUM_THRESHOLD,
        }
    }
}

impl StatuslineConfig {
    pub fn from_args(args: &Args) -> Self {
        Self {
            // clap enforces >= 1 but the struct may be built by hand elsewhere
            context_limit: args.context_limit.max(1),
            max_input_size: usize::try_from(args.max_input_bytes).unwrap_or(usize::MAX),
            high_threshold: args.high_threshold,
            medium_threshold: args.medium_threshold,
        }
    }

    /// Share of the context window used, in percent.
    pub fn context_percent(&self, used_tokens: u64) -> f64 {
        if self.context_limit == 0 {
            return 0.0;
        }
        (used_tokens as f64 / self.context_limit as f64) * 100.0
    }
}
