//! # CLI Interface
//!
//! Command-line argument structure for `dlt-wallet`, using `clap` derive.
//! One subcommand per wallet operation, plus `serve` and `version`.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::Path;

use crate::logging::LogFormat;

/// Log filter for `serve` when `RUST_LOG` is unset. Request spans come from
/// `tower_http`.
pub const SERVE_LOG_FILTER: &str = "dlt_wallet=info,tower_http=debug";

/// Log filter for one-shot commands when `RUST_LOG` is unset.
pub const COMMAND_LOG_FILTER: &str = "dlt_wallet=warn";

/// Deterministic post-quantum wallet.
///
/// Generates and validates recovery phrases, derives Dilithium3 keys and
/// addresses from them, and signs messages. Results are printed to stdout as
/// JSON; logs go to stderr.
#[derive(Parser, Debug)]
#[command(
    name = "dlt-wallet",
    about = "Deterministic post-quantum wallet",
    version,
    propagate_version = true
)]
pub struct WalletCli {
    /// Log output format.
    #[arg(
        long,
        global = true,
        env = "DLT_LOG_FORMAT",
        value_enum,
        ignore_case = true,
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a new 24-word recovery phrase.
    Generate,
    /// Check a recovery phrase against the BIP-39 wordlist and checksum.
    Validate(MnemonicArgs),
    /// Derive the keypair and address for a recovery phrase.
    Derive(MnemonicArgs),
    /// Sign a message with a private key.
    Sign(SignArgs),
    /// Verify a signature against a public key.
    Verify(VerifyArgs),
    /// Turn a raw 40-char address into its checksummed `dlt1` form.
    Checksum(ChecksumArgs),
    /// Print a public key as lowercase hex.
    PubkeyHex(PubkeyHexArgs),
    /// Serve the wallet operations over HTTP.
    Serve(ServeArgs),
    /// Print version information and exit.
    Version,
}

impl Commands {
    /// The log filter this command runs with unless `RUST_LOG` says otherwise.
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Commands::Serve(_) => SERVE_LOG_FILTER,
            _ => COMMAND_LOG_FILTER,
        }
    }
}

/// A recovery phrase, from the command line or the environment.
#[derive(Args, Debug)]
pub struct MnemonicArgs {
    /// The recovery phrase. Prefer `DLT_MNEMONIC` so it stays out of shell
    /// history.
    #[arg(env = "DLT_MNEMONIC", hide_env_values = true)]
    pub mnemonic: String,
}

/// Arguments for the `sign` subcommand.
#[derive(Args, Debug)]
pub struct SignArgs {
    /// Private key as hex, or `@FILE` to read it from a file.
    #[arg(long)]
    pub private_key: String,

    /// Message to sign. Signed as raw UTF-8 bytes.
    pub message: String,
}

/// Arguments for the `verify` subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Public key as hex, or `@FILE`.
    #[arg(long)]
    pub public_key: String,

    /// Signature as hex, or `@FILE`.
    #[arg(long)]
    pub signature: String,

    /// The signed message.
    pub message: String,
}

/// Arguments for the `checksum` subcommand.
#[derive(Args, Debug)]
pub struct ChecksumArgs {
    /// Raw address hex as returned by `derive`.
    pub address: String,
}

/// Arguments for the `pubkey-hex` subcommand.
#[derive(Args, Debug)]
pub struct PubkeyHexArgs {
    /// Public key as hex, or `@FILE` (hex text or raw bytes).
    pub public_key: String,
}

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind both listeners to.
    #[arg(long, env = "DLT_BIND", default_value = "127.0.0.1")]
    pub bind: String,

    /// Port for the wallet API.
    #[arg(long, short = 'p', env = "DLT_PORT", default_value_t = 9750)]
    pub port: u16,

    /// Port for the Prometheus metrics endpoint.
    #[arg(long, env = "DLT_METRICS_PORT", default_value_t = 9751)]
    pub metrics_port: u16,

    /// Requests that take longer than this are cut off with 408.
    #[arg(long, env = "DLT_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,
}

/// Resolve a byte-valued argument.
///
/// `@path` reads the file: if its trimmed contents are hex they are decoded,
/// otherwise the file is taken as raw bytes. Anything else must be hex.
pub fn read_bytes_arg(arg: &str) -> Result<Vec<u8>> {
    match arg.strip_prefix('@') {
        Some(path) => read_bytes_file(Path::new(path)),
        None => hex::decode(arg.trim()).context("argument is not valid hex"),
    }
}

fn read_bytes_file(path: &Path) -> Result<Vec<u8>> {
    let raw = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let decoded = std::str::from_utf8(&raw)
        .ok()
        .and_then(|text| hex::decode(text.trim()).ok());
    Ok(decoded.unwrap_or(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    #[test]
    fn verify_cli_structure() {
        // Ensures the derive macros produce a valid CLI definition.
        WalletCli::command().debug_assert();
    }

    #[test]
    fn subcommand_names_are_kebab_case() {
        let cli = WalletCli::try_parse_from(["dlt-wallet", "pubkey-hex", "abcd"]).unwrap();
        assert!(matches!(cli.command, Commands::PubkeyHex(ref a) if a.public_key == "abcd"));
    }

    #[test]
    fn serve_defaults() {
        let cli = WalletCli::try_parse_from(["dlt-wallet", "serve"]).unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.port, 9750);
        assert_eq!(args.metrics_port, 9751);
        assert_eq!(args.request_timeout_secs, 30);
    }

    #[test]
    fn log_filter_follows_the_command() {
        let serve = WalletCli::try_parse_from(["dlt-wallet", "serve"]).unwrap();
        assert_eq!(serve.command.default_log_filter(), SERVE_LOG_FILTER);

        let derive = WalletCli::try_parse_from(["dlt-wallet", "derive", "abandon"]).unwrap();
        assert_eq!(derive.command.default_log_filter(), COMMAND_LOG_FILTER);
    }

    #[test]
    fn log_format_flag() {
        let cli = WalletCli::try_parse_from(["dlt-wallet", "--log-format", "JSON", "generate"])
            .unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
        assert!(WalletCli::try_parse_from(["dlt-wallet", "--log-format", "yaml", "generate"])
            .is_err());
    }

    #[test]
    fn sign_requires_a_key() {
        assert!(WalletCli::try_parse_from(["dlt-wallet", "sign", "hello"]).is_err());
    }

    #[test]
    fn hex_argument() {
        assert_eq!(read_bytes_arg("00ff").unwrap(), vec![0x00, 0xff]);
        assert!(read_bytes_arg("zz").is_err());
    }

    #[test]
    fn file_argument_with_hex_text() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "deadbeef").unwrap();
        let arg = format!("@{}", file.path().display());
        assert_eq!(read_bytes_arg(&arg).unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn file_argument_with_raw_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0x00, 0x10]).unwrap();
        let arg = format!("@{}", file.path().display());
        assert_eq!(read_bytes_arg(&arg).unwrap(), vec![0xff, 0x00, 0x10]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = read_bytes_arg("@/nonexistent/dlt-wallet-key").unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
