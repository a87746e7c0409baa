//! # Context Statusline
//!
//! A one-shot statusline renderer for Claude Code sessions that reports how much
//! of the context window the latest turn used and how long the answer took.
//!
//! ## Overview
//!
//! The binary reads the hook JSON from stdin, scans the session transcript
//! backward for the most recent assistant turn with usage counters, and prints
//! a single line:
//! - Model and API endpoint host
//! - Current directory and Git branch
//! - Context window utilization, color banded
//! - Answer duration and whether the session is still running
//!
//! ## Features
//!
//! - `colors` (default): Enables styled stderr diagnostics via owo-colors

/// Command-line argument parsing
pub mod cli;

/// Immutable runtime configuration (limits and thresholds)
pub mod config;

/// Display formatting for text and JSON output
pub mod display;

/// Fatal input errors
pub mod error;

/// Git branch lookup from `.git/HEAD`
pub mod git;

/// Hook JSON intake from stdin
pub mod input;

/// Tracing subscriber setup
pub mod logging;

/// Data models for hooks, transcript lines, and usage snapshots
pub mod models;

/// API endpoint host resolution from env and settings.json
pub mod settings;

/// Backward transcript scan producing a usage snapshot
pub mod transcript;

/// Utility functions for paths, formatting, and time
pub mod utils;
