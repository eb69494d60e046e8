//! Error types for the wallet core.
//!
//! Every fallible operation in the crate returns a [`WalletError`]. Messages
//! describe what was wrong with the input (lengths, which check failed) and
//! never include key, seed, or mnemonic material.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type WalletResult<T> = Result<T, WalletError>;

/// Everything that can go wrong between a mnemonic and a signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// The OS randomness source failed while generating a mnemonic.
    #[error("entropy source failed: {0}")]
    EntropyError(String),

    /// Entropy could not be turned into a mnemonic phrase.
    #[error("mnemonic encoding failed: {0}")]
    MnemonicEncodingError(String),

    /// Derivation was asked to run on empty text.
    #[error("mnemonic required")]
    EmptyMnemonic,

    /// Private key bytes are not a packed Dilithium3 private key.
    #[error("invalid private key: expected {expected} bytes, got {actual}")]
    InvalidPrivateKeyEncoding {
        /// Length the parameter set requires.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },

    /// Public key bytes are not a packed Dilithium3 public key.
    #[error("invalid public key: expected {expected} bytes, got {actual}")]
    InvalidPublicKeyEncoding {
        /// Length the parameter set requires.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },

    /// Key generation failed on an otherwise well-formed keystream.
    #[error("key generation failed: {0}")]
    KeyGenerationError(String),

    /// A read would run past the HKDF output bound.
    #[error("keystream exhausted: requested {requested} bytes, {remaining} remaining")]
    KeystreamExhausted {
        /// Bytes the caller asked for.
        requested: usize,
        /// Bytes still available when the read was refused.
        remaining: usize,
    },

    /// A checksummed address failed to parse.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

impl WalletError {
    /// Stable snake_case tag for the error, used by the host boundary so
    /// callers can branch without parsing messages.
    pub fn kind(&self) -> &'static str {
        match self {
            WalletError::EntropyError(_) => "entropy_error",
            WalletError::MnemonicEncodingError(_) => "mnemonic_encoding_error",
            WalletError::EmptyMnemonic => "empty_mnemonic",
            WalletError::InvalidPrivateKeyEncoding { .. } => "invalid_private_key_encoding",
            WalletError::InvalidPublicKeyEncoding { .. } => "invalid_public_key_encoding",
            WalletError::KeyGenerationError(_) => "key_generation_error",
            WalletError::KeystreamExhausted { .. } => "keystream_exhausted",
            WalletError::InvalidAddress(_) => "invalid_address",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_key_error_reports_lengths() {
        let err = WalletError::InvalidPrivateKeyEncoding {
            expected: 4000,
            actual: 12,
        };
        assert_eq!(
            err.to_string(),
            "invalid private key: expected 4000 bytes, got 12"
        );
        assert_eq!(err.kind(), "invalid_private_key_encoding");
    }

    #[test]
    fn empty_mnemonic_message() {
        assert_eq!(WalletError::EmptyMnemonic.to_string(), "mnemonic required");
    }
}
