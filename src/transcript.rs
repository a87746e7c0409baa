//! # Transcript Module
//!
//! Derives a [`UsageSnapshot`] from a Claude Code session transcript
//! (append-only JSON Lines).
//!
//! The scan walks backward from the end of the log so that its cost is bounded
//! by how far back the latest assistant turn sits, not by the size of the log.
//! It runs in two passes over the same lines:
//!
//! 1. [`find_latest_answer`] locates the newest `assistant` record carrying a
//!    `usage` block, noting any session boundary seen on the way.
//! 2. [`find_question_before`] walks further back from that record to the
//!    nearest user-authored `user` record.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::models::{Timestamp, TranscriptLine, UsageSnapshot};

/// Decode one raw line. Blank and malformed lines are `None`.
fn decode_line(raw: &str) -> Option<TranscriptLine> {
    let t = raw.trim();
    if t.is_empty() {
        return None;
    }
    serde_json::from_str::<TranscriptLine>(t).ok()
}

/// Newest assistant record with usage counters and its line index.
#[derive(Debug)]
pub struct LatestAnswer {
    pub index: usize,
    pub record: TranscriptLine,
}

/// Result of pass 1. `boundary_seen` covers only lines after the answer.
#[derive(Debug, Default)]
pub struct AnswerSearch {
    pub answer: Option<LatestAnswer>,
    pub boundary_seen: bool,
}

/// Pass 1: scan from the end for the first assistant record with `usage`.
/// Boundary markers only flag `boundary_seen`; they never end the pass.
pub fn find_latest_answer<S: AsRef<str>>(lines: &[S]) -> AnswerSearch {
    let mut search = AnswerSearch::default();
    for (index, raw) in lines.iter().enumerate().rev() {
        let Some(record) = decode_line(raw.as_ref()) else {
            continue;
        };
        if record.is_session_boundary() {
            search.boundary_seen = true;
            continue;
        }
        if record.is_type("assistant") && record.usage().is_some() {
            search.answer = Some(LatestAnswer { index, record });
            break;
        }
    }
    search
}

/// Pass 2: nearest `user` record strictly before `before`, that has a message
/// body and is not a tool-result echo. Returns its timestamp if it has one.
pub fn find_question_before<S: AsRef<str>>(lines: &[S], before: usize) -> Option<Timestamp> {
    let end = before.min(lines.len());
    for raw in lines[..end].iter().rev() {
        let Some(record) = decode_line(raw.as_ref()) else {
            continue;
        };
        if record.is_type("user") && record.message.is_some() && !record.has_tool_use_result {
            return record.timestamp;
        }
    }
    None
}

/// Build the usage snapshot for a transcript already split into lines.
pub fn scan_transcript<S: AsRef<str>>(lines: &[S], now: Timestamp) -> UsageSnapshot {
    let mut snapshot = UsageSnapshot::empty(now, !lines.is_empty());

    let search = find_latest_answer(lines);
    if search.boundary_seen {
        snapshot.is_running = false;
    }
    let Some(LatestAnswer { index, record }) = search.answer else {
        debug!(lines = lines.len(), "no assistant usage in transcript");
        return snapshot;
    };

    if let Some(usage) = record.usage() {
        snapshot.context_used_tokens = usage.context_tokens();
    }
    if let Some(ts) = record.timestamp.clone() {
        snapshot.answer_timestamp = ts;
    }
    if let Some(msg) = record.message.as_ref() {
        if let Some(model) = msg.model.as_deref().filter(|m| !m.is_empty()) {
            snapshot.resolved_model = Some(model.to_string());
        }
        if msg.stop_reason.as_deref() == Some("end_turn") {
            snapshot.is_running = false;
        }
    }
    if let Some(ts) = find_question_before(lines, index) {
        snapshot.question_timestamp = ts;
    }

    debug!(
        answer_line = index,
        tokens = snapshot.context_used_tokens,
        running = snapshot.is_running,
        "scanned transcript"
    );
    snapshot
}

/// Read the transcript fully into memory. Appends made after this read are not
/// observed by the scan.
pub fn read_transcript_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read transcript {}", path.display()))?;
    Ok(content.lines().map(str::to_owned).collect())
}

/// Best-effort snapshot for a transcript path. A log that cannot be read says
/// nothing about the turn, so the session is still reported as running; only
/// a log that was read and holds no lines is idle.
pub fn snapshot_from_path(path: &Path, now: Timestamp) -> (UsageSnapshot, usize) {
    match read_transcript_lines(path) {
        Ok(lines) => (scan_transcript(&lines, now), lines.len()),
        Err(e) => {
            debug!(error = %format!("{e:#}"), "transcript unavailable, using defaults");
            (UsageSnapshot::empty(now, true), 0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const NOW: f64 = 1_000_000.0;

    fn now() -> Timestamp {
        Timestamp::Epoch(NOW)
    }

    fn assistant(input: u64, output: u64, ts: f64, stop: Option<&str>) -> String {
        let stop = stop.map(|s| format!(r#","stop_reason":"{s}""#)).unwrap_or_default();
        format!(
            r#"{{"type":"assistant","message":{{"model":"claude-test","usage":{{"input_tokens":{input},"output_tokens":{output}}}{stop}}},"timestamp":{ts}}}"#
        )
    }

    fn user(ts: f64) -> String {
        format!(r#"{{"type":"user","message":{{"role":"user","content":"hi"}},"timestamp":{ts}}}"#)
    }

    #[test]
    fn empty_log_is_not_running() {
        let lines: Vec<String> = Vec::new();
        let snap = scan_transcript(&lines, now());
        assert_eq!(snap, UsageSnapshot::empty(now(), false));
        assert!(!snap.is_running);
        assert_eq!(snap.response_seconds(), 0.0);
    }

    #[test]
    fn sums_all_four_counters_including_zero() {
        let lines = vec![
            r#"{"type":"assistant","message":{"usage":{"input_tokens":7,"cache_creation_input_tokens":0,"cache_read_input_tokens":123456,"output_tokens":9}},"timestamp":1}"#,
        ];
        let snap = scan_transcript(&lines, now());
        assert_eq!(snap.context_used_tokens, 7 + 123_456 + 9);

        let zeros = vec![
            r#"{"type":"assistant","message":{"usage":{"input_tokens":0,"cache_creation_input_tokens":0,"cache_read_input_tokens":0,"output_tokens":0}}}"#,
        ];
        assert_eq!(scan_transcript(&zeros, now()).context_used_tokens, 0);
    }

    #[test]
    fn latest_assistant_wins_over_larger_earlier_one() {
        let lines = vec![
            user(1.0),
            assistant(150_000, 10_000, 2.0, Some("end_turn")),
            user(3.0),
            assistant(100, 1, 4.0, None),
        ];
        let snap = scan_transcript(&lines, now());
        assert_eq!(snap.context_used_tokens, 101);
        assert_eq!(snap.answer_timestamp, Timestamp::Epoch(4.0));
        assert_eq!(snap.question_timestamp, Timestamp::Epoch(3.0));
        assert!(snap.is_running);
    }

    #[test]
    fn missing_question_keeps_default_timestamp() {
        let lines = vec![assistant(1, 1, NOW, None)];
        let snap = scan_transcript(&lines, now());
        assert_eq!(snap.question_timestamp, now());
        assert_eq!(snap.response_seconds(), 0.0);
    }

    #[test]
    fn tool_results_are_not_questions() {
        let lines = vec![
            user(10.0),
            r#"{"type":"user","message":{"content":[]},"toolUseResult":{"stdout":""},"timestamp":20}"#
                .to_string(),
            assistant(5, 5, 25.0, Some("end_turn")),
        ];
        let snap = scan_transcript(&lines, now());
        assert_eq!(snap.question_timestamp, Timestamp::Epoch(10.0));
        assert_eq!(snap.response_seconds(), 15.0);
    }

    #[test]
    fn user_without_message_is_skipped() {
        let lines = vec![
            user(1.0),
            r#"{"type":"user","timestamp":2}"#.to_string(),
            assistant(1, 1, 3.0, None),
        ];
        let snap = scan_transcript(&lines, now());
        assert_eq!(snap.question_timestamp, Timestamp::Epoch(1.0));
    }

    #[test]
    fn running_flags() {
        let running = vec![user(1.0), assistant(1, 1, 2.0, Some("tool_use"))];
        assert!(scan_transcript(&running, now()).is_running);

        let ended = vec![user(1.0), assistant(1, 1, 2.0, Some("end_turn"))];
        assert!(!scan_transcript(&ended, now()).is_running);

        let only_user = vec![user(1.0)];
        assert!(scan_transcript(&only_user, now()).is_running);

        // a blank line still makes the log non-empty
        let blank = vec![String::new()];
        assert!(scan_transcript(&blank, now()).is_running);
    }

    #[test]
    fn boundary_after_answer_stops_running_but_usage_is_still_found() {
        let lines = vec![
            user(1.0),
            assistant(40, 2, 2.0, None),
            r#"{"type":"summary","summary":"done"}"#.to_string(),
            r#"{"type":"file-history-snapshot","snapshot":{}}"#.to_string(),
        ];
        let snap = scan_transcript(&lines, now());
        assert!(!snap.is_running);
        assert_eq!(snap.context_used_tokens, 42);
        assert_eq!(snap.resolved_model.as_deref(), Some("claude-test"));
    }

    #[test]
    fn boundary_before_answer_is_never_seen() {
        let lines = vec![
            r#"{"type":"summary","summary":"old"}"#.to_string(),
            user(1.0),
            assistant(1, 1, 2.0, None),
        ];
        assert!(scan_transcript(&lines, now()).is_running);
    }

    #[test]
    fn malformed_and_foreign_lines_are_skipped() {
        let lines = vec![
            user(1.0),
            "{not json".to_string(),
            assistant(10, 10, 2.0, Some("end_turn")),
            "[1,2,3]".to_string(),
            r#"{"type":"system","content":"hello"}"#.to_string(),
            r#"{"type":"assistant","message":"not an object"}"#.to_string(),
            "   ".to_string(),
        ];
        let snap = scan_transcript(&lines, now());
        assert_eq!(snap.context_used_tokens, 20);
        assert_eq!(snap.response_seconds(), 1.0);
    }

    #[test]
    fn assistant_without_usage_is_passed_over() {
        let lines = vec![
            user(1.0),
            assistant(3, 4, 2.0, None),
            r#"{"type":"assistant","message":{"model":"other","content":[]},"timestamp":3}"#
                .to_string(),
        ];
        let snap = scan_transcript(&lines, now());
        assert_eq!(snap.context_used_tokens, 7);
        assert_eq!(snap.model_or("fallback"), "claude-test");
    }

    #[test]
    fn model_falls_back_when_absent_or_empty() {
        let lines = vec![r#"{"type":"assistant","message":{"model":"","usage":{}}}"#];
        let snap = scan_transcript(&lines, now());
        assert_eq!(snap.resolved_model, None);
        assert_eq!(snap.model_or("Opus"), "Opus");
        // answer timestamp absent: stays at now
        assert_eq!(snap.answer_timestamp, now());
    }

    #[test]
    fn question_search_is_bounded_by_the_answer_index() {
        let lines = vec![user(1.0), assistant(1, 1, 2.0, None), user(3.0)];
        assert_eq!(find_question_before(&lines, 1), Some(Timestamp::Epoch(1.0)));
        assert_eq!(find_question_before(&lines, 0), None);
        assert_eq!(find_question_before(&lines, 99), Some(Timestamp::Epoch(3.0)));
    }

    #[test]
    fn missing_file_degrades_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (snap, count) = snapshot_from_path(&dir.path().join("nope.jsonl"), now());
        assert_eq!(count, 0);
        assert_eq!(snap.context_used_tokens, 0);
        assert_eq!(snap.resolved_model, None);
        assert_eq!(snap.response_seconds(), 0.0);
    }

    #[test]
    fn unreadable_transcript_still_counts_as_running() {
        let dir = tempfile::tempdir().unwrap();
        let (snap, _) = snapshot_from_path(&dir.path().join("nope.jsonl"), now());
        assert_eq!(snap, UsageSnapshot::empty(now(), true));
        assert!(snap.is_running);

        // a directory is not readable as a file either
        let (snap, _) = snapshot_from_path(dir.path(), now());
        assert!(snap.is_running);
    }

    #[test]
    fn empty_file_on_disk_is_idle() {
        let f = tempfile::NamedTempFile::new().unwrap();
        let (snap, count) = snapshot_from_path(f.path(), now());
        assert_eq!(count, 0);
        assert!(!snap.is_running);
    }

    #[test]
    fn odd_counter_types_do_not_hide_the_latest_answer() {
        let lines = vec![
            r#"{"type":"assistant","message":{"usage":{"input_tokens":5}}}"#,
            r#"{"type":"assistant","message":{"usage":{"input_tokens":100.0,"output_tokens":1,"cache_read_input_tokens":"7"}}}"#,
        ];
        let snap = scan_transcript(&lines, now());
        assert_eq!(snap.context_used_tokens, 101);
    }

    #[test]
    fn reads_transcript_from_disk() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "{}", user(5.0)).unwrap();
        writeln!(f, "{}", assistant(100, 50, 10.0, Some("end_turn"))).unwrap();
        let (snap, count) = snapshot_from_path(f.path(), now());
        assert_eq!(count, 2);
        assert_eq!(snap.context_used_tokens, 150);
        assert_eq!(snap.response_seconds(), 5.0);
        assert!(!snap.is_running);
    }
}
