//! Logging setup using `tracing-subscriber`.
//!
//! The library emits `tracing` events only. The CLI routes them to stderr so
//! they never mix with JSON written to stdout.
//!
//! Levels: `warn` by default (unknown columns, unknown chart types), `debug`
//! with `--verbose` (pipeline steps and counts). `RUST_LOG` overrides both.

use std::io;

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Logging options derived from CLI flags.
#[derive(Debug, Clone, Copy)]
pub struct LogConfig {
    pub level: Level,
    pub with_ansi: bool,
}

impl LogConfig {
    #[must_use]
    pub fn from_verbose(verbose: bool) -> Self {
        Self {
            level: if verbose { Level::DEBUG } else { Level::WARN },
            with_ansi: true,
        }
    }
}

/// Install the global subscriber. Call once at startup.
pub fn init_logging(config: LogConfig) {
    let layer = fmt::layer()
        .compact()
        .with_writer(io::stderr)
        .with_ansi(config.with_ansi)
        .with_target(false)
        .without_time();

    // A second init (e.g. from tests) is not an error worth surfacing.
    let _ = tracing_subscriber::registry()
        .with(build_env_filter(config.level))
        .with(layer)
        .try_init();
}

/// Build an `EnvFilter` from the given level, respecting `RUST_LOG`.
fn build_env_filter(level: Level) -> EnvFilter {
    let level = level.as_str().to_lowercase();

    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("warn,chartwise={level},chartwise_cli={level}"))
    })
}
