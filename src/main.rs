use std::path::Path;
use std::process::ExitCode;

use context_statusline::cli::Args;
use context_statusline::config::StatuslineConfig;
use context_statusline::display::{StatusView, print_debug, print_json_output, print_text_output};
use context_statusline::error::InputError;
use context_statusline::git::read_branch;
use context_statusline::input::read_hook;
use context_statusline::logging::init_logging;
use context_statusline::models::Timestamp;
use context_statusline::settings::endpoint_host;
use context_statusline::transcript::snapshot_from_path;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.debug);
    let config = StatuslineConfig::from_args(&args);

    let hook = match read_hook(config.max_input_size) {
        Ok(hook) => hook,
        Err(e) => {
            report_input_error(&e);
            return ExitCode::FAILURE;
        }
    };

    let (snapshot, transcript_lines) =
        snapshot_from_path(Path::new(&hook.transcript_path), Timestamp::now());
    // Branch comes from the directory Claude Code launched us in
    let git_branch = read_branch(Path::new("."));
    let (host, host_source) = endpoint_host(args.settings_file.as_deref());

    let view = StatusView {
        hook: &hook,
        snapshot: &snapshot,
        host: host.as_deref(),
        git_branch: git_branch.as_deref(),
        config: &config,
    };

    if args.json {
        if let Err(e) = print_json_output(&view) {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    } else {
        print_text_output(&view);
    }
    if args.debug {
        print_debug(&view, transcript_lines, host_source);
    }
    ExitCode::SUCCESS
}

fn report_input_error(e: &InputError) {
    tracing::debug!(error = ?e, "rejecting hook input");
    println!("Error: {e}");
}
