// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # DLT Wallet Host
//!
//! Entry point for the `dlt-wallet` binary. Parses CLI arguments,
//! initializes logging, and either runs one wallet operation or serves all of
//! them over HTTP.
//!
//! One-shot subcommands print their result to stdout as pretty JSON in the
//! same tagged form the HTTP API returns, and exit non-zero when the
//! operation failed.

mod api;
mod cli;
mod logging;
mod metrics;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;

use dlt_wallet::ops::{self, OpResult};

use cli::{Commands, WalletCli};
use metrics::WalletMetrics;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = WalletCli::parse();

    if let Commands::Version = cli.command {
        print_version();
        return Ok(());
    }

    logging::init_logging(cli.command.default_log_filter(), cli.log_format);

    match cli.command {
        Commands::Serve(args) => serve(args).await,
        command => run_command(command),
    }
}

/// Runs a single wallet operation and prints its result.
fn run_command(command: Commands) -> Result<()> {
    match command {
        Commands::Generate => print_op("generate_mnemonic", &ops::generate_mnemonic()),
        Commands::Validate(args) => print_json(&serde_json::json!({
            "valid": ops::validate_mnemonic(&args.mnemonic)
        })),
        Commands::Derive(args) => print_op("derive_keys", &ops::derive_keys(&args.mnemonic)),
        Commands::Sign(args) => {
            let private_key =
                cli::read_bytes_arg(&args.private_key).context("failed to read private key")?;
            print_op("sign", &ops::sign(&private_key, &args.message))
        }
        Commands::Verify(args) => {
            let public_key =
                cli::read_bytes_arg(&args.public_key).context("failed to read public key")?;
            let signature =
                cli::read_bytes_arg(&args.signature).context("failed to read signature")?;
            let valid = ops::verify(&public_key, &args.message, &signature);
            print_json(&serde_json::json!({ "valid": valid }))?;
            if !valid {
                bail!("signature does not verify");
            }
            Ok(())
        }
        Commands::Checksum(args) => print_json(&serde_json::json!({
            "address": ops::checksum_address(&args.address)
        })),
        Commands::PubkeyHex(args) => {
            let public_key =
                cli::read_bytes_arg(&args.public_key).context("failed to read public key")?;
            print_json(&serde_json::json!({ "hex": ops::public_key_hex(&public_key) }))
        }
        Commands::Serve(_) | Commands::Version => unreachable!("handled in main"),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to encode result")?;
    println!("{}", text);
    Ok(())
}

/// Prints the tagged result; a failed operation becomes a non-zero exit.
fn print_op<T: Serialize>(op: &str, result: &OpResult<T>) -> Result<()> {
    print_json(result)?;
    if let Some(kind) = result.error_kind() {
        bail!("{} failed: {}", op, kind);
    }
    Ok(())
}

/// Serves the wallet API and the metrics endpoint until shutdown.
async fn serve(args: cli::ServeArgs) -> Result<()> {
    tracing::info!(
        bind = %args.bind,
        port = args.port,
        metrics_port = args.metrics_port,
        request_timeout_secs = args.request_timeout_secs,
        "starting dlt-wallet service"
    );

    // --- Metrics ---
    let wallet_metrics = Arc::new(WalletMetrics::new());

    // --- Application state ---
    let app_state = api::AppState {
        version: env!("CARGO_PKG_VERSION").to_string(),
        metrics: Arc::clone(&wallet_metrics),
        request_timeout: Duration::from_secs(args.request_timeout_secs),
    };

    // --- API server ---
    let api_router = api::create_router(app_state);
    let api_addr = format!("{}:{}", args.bind, args.port);
    let api_listener = tokio::net::TcpListener::bind(&api_addr)
        .await
        .with_context(|| format!("failed to bind API listener on {}", api_addr))?;
    tracing::info!("API server listening on {}", api_addr);

    // --- Metrics server ---
    let metrics_router = axum::Router::new()
        .route("/metrics", axum::routing::get(metrics::metrics_handler))
        .with_state(Arc::clone(&wallet_metrics));
    let metrics_addr = format!("{}:{}", args.bind, args.metrics_port);
    let metrics_listener = tokio::net::TcpListener::bind(&metrics_addr)
        .await
        .with_context(|| format!("failed to bind metrics listener on {}", metrics_addr))?;
    tracing::info!("Metrics server listening on {}", metrics_addr);

    // --- Serve ---
    tokio::select! {
        res = axum::serve(api_listener, api_router) => {
            if let Err(e) = res {
                tracing::error!("API server error: {}", e);
            }
        }
        res = axum::serve(metrics_listener, metrics_router) => {
            if let Err(e) = res {
                tracing::error!("Metrics server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            tracing::info!("shutdown signal received");
        }
    }

    tracing::info!("dlt-wallet service stopped");
    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("dlt-wallet {}", env!("CARGO_PKG_VERSION"));
    println!("scheme     {}", dlt_wallet::config::SIGNATURE_SCHEME);
    println!("rustc      {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}

/// Waits for SIGINT (Ctrl+C) or SIGTERM, whichever comes first.
///
/// On non-Unix platforms, only Ctrl+C is supported.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
