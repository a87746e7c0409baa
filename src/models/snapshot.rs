use serde::Serialize;

use super::message::{Timestamp, response_seconds};

/// What the transcript says about the latest answered turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageSnapshot {
    pub context_used_tokens: u64,
    pub answer_timestamp: Timestamp,
    pub question_timestamp: Timestamp,
    pub is_running: bool,
    pub resolved_model: Option<String>,
}

impl UsageSnapshot {
    /// Snapshot used when the log holds no assistant usage: zero tokens and a
    /// zero-length answer anchored at `now`.
    pub fn empty(now: Timestamp, log_non_empty: bool) -> Self {
        Self {
            context_used_tokens: 0,
            answer_timestamp: now.clone(),
            question_timestamp: now,
            is_running: log_non_empty,
            resolved_model: None,
        }
    }

    /// Model named by the transcript, else the caller's model.
    pub fn model_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.resolved_model.as_deref().unwrap_or(fallback)
    }

    pub fn response_seconds(&self) -> f64 {
        response_seconds(&self.answer_timestamp, &self.question_timestamp)
    }
}
