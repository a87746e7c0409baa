use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
#[command(about = "Render a single-line context usage summary for Claude Code")]
pub struct Args {
    /// Context window size used as the 100% mark
    #[arg(long, env = "CLAUDE_CONTEXT_LIMIT", default_value_t = crate::config::DEFAULT_CONTEXT_LIMIT,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub context_limit: u64,

    /// Reject stdin payloads larger than this many bytes
    #[arg(long = "max-input-bytes", env = "CLAUDE_STATUSLINE_MAX_INPUT",
          default_value_t = crate::config::DEFAULT_MAX_INPUT_SIZE as u64,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub max_input_bytes: u64,

    /// Percentage above which the context section turns red
    #[arg(long, default_value_t = crate::config::DEFAULT_HIGH_THRESHOLD)]
    pub high_threshold: f64,

    /// Percentage above which the context section turns yellow
    #[arg(long, default_value_t = crate::config::DEFAULT_MEDIUM_THRESHOLD)]
    pub medium_threshold: f64,

    /// Settings file consulted for the endpoint when ANTHROPIC_BASE_URL is unset.
    /// Defaults to ~/.claude/settings.json
    #[arg(long, env = "CLAUDE_SETTINGS_FILE")]
    pub settings_file: Option<PathBuf>,

    /// Emit JSON instead of the colored line
    #[arg(long)]
    pub json: bool,

    /// Debug mode: print diagnostics and debug logs to stderr
    #[arg(long, env = "CLAUDE_DEBUG")]
    pub debug: bool,
}

impl Args {
    pub fn parse() -> Self {
        <Args as clap::Parser>::parse()
    }
}
