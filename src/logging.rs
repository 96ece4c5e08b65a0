//! Logging setup for the binary: `tracing` events routed to stderr through `tracing-subscriber`.
//!
//! - `warn`: skipped leaves, ignored dark alpha
//! - `info`: build summary
//! - `debug`: per-traversal counts and invalid values
//! - `trace`: every emitted variable and expression

use anyhow::{anyhow, Result};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Level for a `-v` count: 0 = warn, 1 = info, 2 = debug, 3+ = trace.
pub fn level_for_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Build an `EnvFilter` from the given level, letting `RUST_LOG` override it.
fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level.as_str().to_lowercase();
        EnvFilter::new(format!("warn,tailpal={level}"))
    })
}

/// Install the global subscriber. Fails if one is already set.
pub fn init_logging(verbose: u8) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(level_for_verbosity(verbose)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {e}"))
}
