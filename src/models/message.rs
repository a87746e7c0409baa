use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Token counters of one assistant turn. Counters of an unexpected JSON type
/// decode as absent rather than rejecting the record.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageUsage {
    #[serde(default, deserialize_with = "lenient_count")]
    pub input_tokens: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub output_tokens: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub cache_creation_input_tokens: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub cache_read_input_tokens: Option<u64>,
}

/// Non-negative integers as-is, non-negative floats truncated, anything else absent.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && *f >= 0.0)
            .map(|f| f as u64)
    }))
}

impl MessageUsage {
    /// Tokens occupying the context window after this turn; missing counters are zero.
    pub fn context_tokens(&self) -> u64 {
        self.input_tokens
            .unwrap_or(0)
            .saturating_add(self.cache_creation_input_tokens.unwrap_or(0))
            .saturating_add(self.cache_read_input_tokens.unwrap_or(0))
            .saturating_add(self.output_tokens.unwrap_or(0))
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct MessageObj {
    pub usage: Option<MessageUsage>,
    pub model: Option<String>,
    pub stop_reason: Option<String>,
}

/// When a transcript event happened. Claude Code writes RFC 3339 strings; older
/// logs and synthetic fixtures use epoch seconds.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Timestamp {
    Epoch(f64),
    Iso(String),
}

impl Timestamp {
    pub fn now() -> Self {
        let now = chrono::Utc::now();
        Timestamp::Epoch(now.timestamp_millis() as f64 / 1000.0)
    }
}

fn parse_iso(s: &str) -> Option<ParsedIso> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(ParsedIso::Aware(dt.timestamp_millis()));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ParsedIso::Naive(dt.and_utc().timestamp_millis()));
        }
    }
    None
}

enum ParsedIso {
    Aware(i64),
    Naive(i64),
}

/// Seconds between question and answer. Mismatched kinds (an epoch default
/// against a string from the log, or naive against offset-aware) yield 0.
pub fn response_seconds(answer: &Timestamp, question: &Timestamp) -> f64 {
    match (answer, question) {
        (Timestamp::Epoch(a), Timestamp::Epoch(q)) => a - q,
        (Timestamp::Iso(a), Timestamp::Iso(q)) => match (parse_iso(a), parse_iso(q)) {
            (Some(ParsedIso::Aware(a)), Some(ParsedIso::Aware(q)))
            | (Some(ParsedIso::Naive(a)), Some(ParsedIso::Naive(q))) => (a - q) as f64 / 1000.0,
            _ => 0.0,
        },
        _ => 0.0,
    }
}

/// One JSON-Lines record from a session transcript. Only the fields the
/// scanner reads are modelled; everything else is ignored.
#[derive(Deserialize, Debug, Clone)]
pub struct TranscriptLine {
    pub r#type: Option<String>,
    pub message: Option<MessageObj>,
    pub timestamp: Option<Timestamp>,
    /// True when the record carries a `toolUseResult` key at all, even `null`
    #[serde(rename = "toolUseResult", default, deserialize_with = "key_present")]
    pub has_tool_use_result: bool,
}

fn key_present<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    serde::de::IgnoredAny::deserialize(deserializer).map(|_| true)
}

impl TranscriptLine {
    pub fn is_type(&self, kind: &str) -> bool {
        self.r#type.as_deref() == Some(kind)
    }

    /// `summary` and `file-history-snapshot` records close a turn.
    pub fn is_session_boundary(&self) -> bool {
        self.is_type("summary") || self.is_type("file-history-snapshot")
    }

    pub fn usage(&self) -> Option<&MessageUsage> {
        self.message.as_ref()?.usage.as_ref()
    }
}
