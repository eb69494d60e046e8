//! # Boundary Operations
//!
//! The six operations a host (CLI, HTTP service, FFI layer) exposes, with
//! results a caller can branch on without parsing strings.
//!
//! Fallible operations return [`OpResult`], which serializes as
//!
//! ```text
//! {"status":"ok", ...payload fields...}
//! {"status":"error","kind":"invalid_private_key_encoding","message":"..."}
//! ```
//!
//! `validate_mnemonic`, `checksum_address` and `public_key_hex` cannot fail
//! and return plain values.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroize;

use crate::crypto::signatures::{self, SignOutput};
use crate::error::{WalletError, WalletResult};
use crate::identity::{self, address, mnemonic};

// ---------------------------------------------------------------------------
// Result envelope
// ---------------------------------------------------------------------------

/// Tagged outcome of a fallible boundary operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OpResult<T> {
    /// The operation succeeded; the payload's fields are flattened into the
    /// envelope.
    Ok(T),
    /// The operation failed.
    Error {
        /// [`WalletError::kind`] of the failure.
        kind: String,
        /// Human-readable description. Never contains key material.
        message: String,
    },
}

impl<T> OpResult<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, OpResult::Ok(_))
    }

    /// The success payload, if any.
    pub fn ok(self) -> Option<T> {
        match self {
            OpResult::Ok(value) => Some(value),
            OpResult::Error { .. } => None,
        }
    }

    /// The error tag, if this is a failure.
    pub fn error_kind(&self) -> Option<&str> {
        match self {
            OpResult::Ok(_) => None,
            OpResult::Error { kind, .. } => Some(kind),
        }
    }
}

impl<T> From<WalletError> for OpResult<T> {
    fn from(err: WalletError) -> Self {
        tracing::debug!(kind = err.kind(), "operation failed");
        OpResult::Error {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

impl<T> From<WalletResult<T>> for OpResult<T> {
    fn from(result: WalletResult<T>) -> Self {
        match result {
            Ok(value) => OpResult::Ok(value),
            Err(err) => err.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// A freshly generated mnemonic.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MnemonicGenerated {
    pub mnemonic: String,
}

impl fmt::Debug for MnemonicGenerated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MnemonicGenerated(<redacted>)")
    }
}

impl Drop for MnemonicGenerated {
    fn drop(&mut self) {
        self.mnemonic.zeroize();
    }
}

/// A derived wallet in transport form. Key bytes serialize as hex.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeysDerived {
    #[serde(with = "hex")]
    pub public_key: Vec<u8>,
    #[serde(with = "hex")]
    pub private_key: Vec<u8>,
    /// Raw 40-char address.
    pub address: String,
}

impl fmt::Debug for KeysDerived {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeysDerived")
            .field("address", &self.address)
            .field("public_key_len", &self.public_key.len())
            .finish_non_exhaustive()
    }
}

impl Drop for KeysDerived {
    fn drop(&mut self) {
        self.private_key.zeroize();
    }
}

/// A signature and its hex form.
pub type Signed = SignOutput;

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Generate a new 24-word mnemonic.
pub fn generate_mnemonic() -> OpResult<MnemonicGenerated> {
    mnemonic::generate_mnemonic()
        .map(|mnemonic| MnemonicGenerated { mnemonic })
        .into()
}

/// Whether `text` is a valid BIP-39 mnemonic. Never fails.
pub fn validate_mnemonic(text: &str) -> bool {
    mnemonic::validate_mnemonic(text)
}

/// Derive the wallet for `text`.
pub fn derive_keys(text: &str) -> OpResult<KeysDerived> {
    identity::derive_keys(text)
        .map(|wallet| KeysDerived {
            public_key: wallet.keypair.public_key.as_bytes().to_vec(),
            private_key: wallet.keypair.private_key.as_bytes().to_vec(),
            address: wallet.address,
        })
        .into()
}

/// Sign the UTF-8 bytes of `message`.
pub fn sign(private_key: &[u8], message: &str) -> OpResult<Signed> {
    signatures::sign(private_key, message.as_bytes()).into()
}

/// Checksummed form of a raw address. Never fails.
pub fn checksum_address(raw_hex: &str) -> String {
    address::checksum_address(raw_hex)
}

/// Lowercase hex of a public key's bytes. Never fails, and does not check
/// that the bytes are a valid key.
pub fn public_key_hex(public_key: &[u8]) -> String {
    hex::encode(public_key)
}

/// Verify a signature over the UTF-8 bytes of `message`.
pub fn verify(public_key: &[u8], message: &str, signature: &[u8]) -> bool {
    signatures::verify(public_key, message.as_bytes(), signature)
}
