//! Endpoint host resolution.
//!
//! `ANTHROPIC_BASE_URL` wins; otherwise the host comes from Claude's
//! `settings.json`. Either source may hold a bare host or a full URL.

use anyhow::{Context, Result};
use serde_json::Value;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::utils::extract_base_host;

pub const BASE_URL_ENV: &str = "ANTHROPIC_BASE_URL";

/// Where the resolved host came from, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostSource {
    Env,
    Settings,
    None,
}

impl HostSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Env => "env",
            Self::Settings => "settings",
            Self::None => "none",
        }
    }
}

/// `~/.claude/settings.json`, if a home directory is known.
pub fn default_settings_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".claude").join("settings.json"))
}

fn read_settings(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read settings {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parse settings {}", path.display()))
}

/// Endpoint URL recorded in a settings document: top-level `anthropic_base_url`,
/// else the `env.ANTHROPIC_BASE_URL` entry Claude Code applies to its sessions.
pub fn settings_base_url(settings: &Value) -> Option<&str> {
    settings
        .get("anthropic_base_url")
        .and_then(Value::as_str)
        .or_else(|| {
            settings
                .get("env")
                .and_then(|e| e.get(BASE_URL_ENV))
                .and_then(Value::as_str)
        })
}

/// Resolve the endpoint host from an env value and a settings file.
pub fn resolve_endpoint_host(
    env_value: Option<&str>,
    settings_path: Option<&Path>,
) -> (Option<String>, HostSource) {
    if let Some(host) = extract_base_host(env_value) {
        return (Some(host), HostSource::Env);
    }
    let Some(path) = settings_path else {
        return (None, HostSource::None);
    };
    match read_settings(path) {
        Ok(settings) => match extract_base_host(settings_base_url(&settings)) {
            Some(host) => (Some(host), HostSource::Settings),
            None => (None, HostSource::None),
        },
        Err(e) => {
            debug!(error = %format!("{e:#}"), "settings unavailable");
            (None, HostSource::None)
        }
    }
}

/// Resolve from the process environment and the given (or default) settings file.
pub fn endpoint_host(settings_override: Option<&Path>) -> (Option<String>, HostSource) {
    let env_value = env::var(BASE_URL_ENV).ok();
    let settings_path = settings_override
        .map(Path::to_path_buf)
        .or_else(default_settings_path);
    resolve_endpoint_host(env_value.as_deref(), settings_path.as_deref())
}
