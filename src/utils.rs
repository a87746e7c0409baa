use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Read;
use std::path::Path;

static SCHEME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://").expect("valid scheme regex"));

/// Read stdin, refusing more than `limit` bytes. Returns `None` when the
/// payload is over the limit.
pub fn read_stdin_limited(limit: usize) -> std::io::Result<Option<Vec<u8>>> {
    read_limited(std::io::stdin().lock(), limit)
}

pub(crate) fn read_limited<R: Read>(reader: R, limit: usize) -> std::io::Result<Option<Vec<u8>>> {
    let mut buf = Vec::new();
    reader
        .take(limit.saturating_add(1) as u64)
        .read_to_end(&mut buf)?;
    if buf.len() > limit {
        return Ok(None);
    }
    Ok(Some(buf))
}

/// Host (authority) of an endpoint given either a bare host or a full URL.
///
/// `"example.com"` and `"https://example.com/v1"` both give `"example.com"`.
/// Userinfo and port are kept. A URL with an empty authority falls back to
/// its first path segment.
pub fn extract_base_host(value: Option<&str>) -> Option<String> {
    let candidate = value?.trim();
    if candidate.is_empty() {
        return None;
    }
    let normalized = if SCHEME_RE.is_match(candidate) {
        candidate.to_string()
    } else {
        format!("https://{candidate}")
    };
    let after_scheme = &normalized[normalized.find("://")? + 3..];
    let authority_end = after_scheme
        .find(['/', '?', '#'])
        .unwrap_or(after_scheme.len());
    let authority = &after_scheme[..authority_end];

    // unbalanced IPv6 brackets are a parse failure
    if authority.contains('[') != authority.contains(']') {
        return None;
    }
    if !authority.is_empty() {
        return Some(authority.to_string());
    }

    let rest = &after_scheme[authority_end..];
    let path_end = rest.find(['?', '#']).unwrap_or(rest.len());
    rest[..path_end]
        .trim_start_matches('/')
        .split('/')
        .next()
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// `MM:SS` for a duration in seconds, floored. Minutes wrap at the hour like a
/// clock face; negative and non-finite durations render as `00:00`.
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", (total / 60) % 60, total % 60)
}

/// `1234567` -> `"1,234,567"`
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Final component of the workspace directory; empty for `/`.
pub fn dir_name(current_dir: &str) -> String {
    Path::new(current_dir)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
