use std::env;

#[cfg(feature = "colors")]
use owo_colors::OwoColorize;

// Provide a no-op color shim when "colors" feature is disabled
#[cfg(not(feature = "colors"))]
pub mod color_shim {
    use std::fmt::{self, Display, Formatter};

    #[derive(Clone)]
    pub struct Plain(pub String);

    impl Display for Plain {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    pub trait ColorizeShim {
        fn as_str(&self) -> &str;

        fn bright_black(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
    }

    impl ColorizeShim for &str {
        fn as_str(&self) -> &str {
            self
        }
    }
    impl ColorizeShim for String {
        fn as_str(&self) -> &str {
            self.as_str()
        }
    }
}

#[cfg(not(feature = "colors"))]
use color_shim::ColorizeShim as OwoColorize;

use crate::config::StatuslineConfig;
use crate::models::{HookJson, UsageSnapshot};
use crate::settings::HostSource;
use crate::utils::{dir_name, format_duration, format_thousands};

pub const UNKNOWN_HOST: &str = "unknown";

/// How full the context window is, as shown by the color of the context section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextBand {
    High,
    Medium,
    None,
}

impl ContextBand {
    /// Bands are exclusive at the top: exactly the high threshold is still medium.
    pub fn classify(percent: f64, config: &StatuslineConfig) -> Self {
        if percent > config.high_threshold {
            Self::High
        } else if percent > config.medium_threshold {
            Self::Medium
        } else {
            Self::None
        }
    }

    /// ANSI SGR code; 0 resets to the terminal default.
    pub fn sgr_code(&self) -> u8 {
        match self {
            Self::High => 31,
            Self::Medium => 33,
            Self::None => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::None => "none",
        }
    }
}

/// Everything the renderer needs, gathered by the caller.
#[derive(Debug, Clone)]
pub struct StatusView<'a> {
    pub hook: &'a HookJson,
    pub snapshot: &'a UsageSnapshot,
    pub host: Option<&'a str>,
    pub git_branch: Option<&'a str>,
    pub config: &'a StatuslineConfig,
}

impl StatusView<'_> {
    pub fn model(&self) -> &str {
        self.snapshot.model_or(&self.hook.model.display_name)
    }

    pub fn percent(&self) -> f64 {
        self.config.context_percent(self.snapshot.context_used_tokens)
    }

    pub fn band(&self) -> ContextBand {
        ContextBand::classify(self.percent(), self.config)
    }
}

fn colors_disabled() -> bool {
    env::var_os("NO_COLOR").is_some()
}

/// Render the status line. `colored = false` drops the SGR wrapping.
pub fn build_status_line(view: &StatusView<'_>, colored: bool) -> String {
    let branch = view
        .git_branch
        .map(|b| format!(" (🌿 {b})"))
        .unwrap_or_default();
    let context = format!(
        "{:.1}% ({}/{} tokens)",
        view.percent(),
        format_thousands(view.snapshot.context_used_tokens),
        format_thousands(view.config.context_limit)
    );
    let context = if colored {
        format!("\x1b[{}m{context}\x1b[0m", view.band().sgr_code())
    } else {
        context
    };
    let running = if view.snapshot.is_running {
        " (running)"
    } else {
        ""
    };
    format!(
        "[{}@{}] 📂 {}{} | 📊 Context: {} | ⏱️ Answer duration: {}{}",
        view.model(),
        view.host.unwrap_or(UNKNOWN_HOST),
        dir_name(&view.hook.workspace.current_dir),
        branch,
        context,
        format_duration(view.snapshot.response_seconds()),
        running
    )
}

pub fn print_text_output(view: &StatusView<'_>) {
    println!("{}", build_status_line(view, !colors_disabled()));
}

/// Machine-readable rendering of the same information.
pub fn build_json_output(view: &StatusView<'_>) -> serde_json::Value {
    let seconds = view.snapshot.response_seconds();
    let shown_seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    serde_json::json!({
        "model": {
            "display_name": view.hook.model.display_name,
            "id": view.hook.model.id,
            "resolved": view.model(),
        },
        "endpoint_host": view.host,
        "session_id": view.hook.session_id,
        "version": view.hook.version,
        "transcript_path": view.hook.transcript_path,
        "workspace": {
            "current_dir": view.hook.workspace.current_dir,
            "dir_name": dir_name(&view.hook.workspace.current_dir),
            "project_dir": view.hook.workspace.project_dir,
        },
        "git_branch": view.git_branch,
        "context": {
            "used_tokens": view.snapshot.context_used_tokens,
            "limit": view.config.context_limit,
            "percent": (view.percent() * 10.0).round() / 10.0,
            "band": view.band().as_str(),
        },
        "response": {
            "seconds": shown_seconds,
            "formatted": format_duration(seconds),
            "running": view.snapshot.is_running,
            "answer_timestamp": view.snapshot.answer_timestamp,
            "question_timestamp": view.snapshot.question_timestamp,
        },
    })
}

pub fn print_json_output(view: &StatusView<'_>) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(&build_json_output(view))?);
    Ok(())
}

/// Diagnostics block written to stderr with `--debug`.
pub fn print_debug(view: &StatusView<'_>, transcript_lines: usize, host_source: HostSource) {
    eprintln!();
    eprintln!("{}", "=== Debug Information ===".bright_black());
    eprintln!(
        "Transcript: {} ({} lines)",
        view.hook.transcript_path, transcript_lines
    );
    eprintln!(
        "Context: {} / {} tokens ({:.2}%, band: {})",
        view.snapshot.context_used_tokens,
        view.config.context_limit,
        view.percent(),
        view.band().as_str()
    );
    eprintln!(
        "Timestamps: question={:?} answer={:?} ({:.3}s)",
        view.snapshot.question_timestamp,
        view.snapshot.answer_timestamp,
        view.snapshot.response_seconds()
    );
    eprintln!(
        "Model: {} (from: {})",
        view.model(),
        if view.snapshot.resolved_model.is_some() {
            "transcript"
        } else {
            "hook"
        }
    );
    eprintln!(
        "Endpoint: {} (source: {})",
        view.host.unwrap_or(UNKNOWN_HOST),
        host_source.as_str()
    );
    eprintln!(
        "Thresholds: medium>{} high>{} max_input={}B",
        view.config.medium_threshold, view.config.high_threshold, view.config.max_input_size
    );
    eprintln!("{}", "========================".bright_black());
}
