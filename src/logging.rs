//! Tracing setup.
//!
//! stdout carries the status line and nothing else, so logs always go to
//! stderr and stay off unless asked for.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a stderr subscriber when `RUST_LOG` is set or `debug` is on.
pub fn init_logging(debug: bool) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if debug => EnvFilter::new("context_statusline=debug"),
        Err(_) => return,
    };
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .without_time(),
        )
        .try_init();
}
