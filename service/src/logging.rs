//! # Structured Logging
//!
//! Initializes the `tracing` subscriber with a JSON or pretty formatter and
//! `RUST_LOG`-based filtering.
//!
//! Everything goes to stderr. Stdout carries command results, which scripts
//! pipe into `jq`.

use clap::ValueEnum;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format, selected with `--log-format` or `DLT_LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable, colored output.
    Pretty,
    /// One JSON object per line, for log aggregation.
    Json,
}

/// Initialize the global tracing subscriber.
///
/// Call this exactly once, early in `main()`. Subsequent calls will panic.
///
/// `default_filter` applies when `RUST_LOG` is unset. The per-command
/// defaults live in [`crate::cli`]; override them with e.g.
///
/// ```text
/// RUST_LOG=dlt_wallet=debug,tower_http=debug
/// ```
///
/// The library logs lengths, positions and addresses at `debug` and below.
/// It never logs mnemonics, seeds or keys at any level.
pub fn init_logging(default_filter: &str, format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    match format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_thread_ids(false)
                        .with_file(true)
                        .with_line_number(true),
                )
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(true),
                )
                .init();
        }
    }

    tracing::debug!("logging initialized (format={:?})", format);
}
