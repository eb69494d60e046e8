//! # Digital Signatures
//!
//! Dilithium3 signing and verification over raw message bytes.
//!
//! The message is signed exactly as given: no length prefix, no domain tag,
//! no context string (round 3 has none). Binding a signature to a transaction
//! hash or any other transcript is the caller's job, done before the bytes
//! reach [`sign`].
//!
//! ## Determinism
//!
//! Signing uses round-3 deterministic mode, where the per-signature
//! randomness is derived from the key and the message. The same
//! (key, message) pair always produces the same signature. Verification is still the
//! property callers should rely on; a future switch to hedged signing would
//! change signature bytes but never their validity.

use serde::Serialize;
use zeroize::Zeroize;

use crate::config::SIGNATURE_LENGTH;
use crate::error::WalletResult;
use crate::identity::keypair::{PrivateKey, PublicKey};

/// A signature plus its hex form, ready for transport.
///
/// Only `signature_hex` is serialized.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct SignOutput {
    /// Encoded Dilithium3 signature, always [`SIGNATURE_LENGTH`] bytes.
    #[serde(skip)]
    pub signature: Vec<u8>,
    /// Lowercase hex of `signature`.
    pub signature_hex: String,
}

impl std::fmt::Debug for SignOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hex_str = &self.signature_hex;
        if hex_str.len() > 16 {
            write!(
                f,
                "SignOutput({}...{})",
                &hex_str[..8],
                &hex_str[hex_str.len() - 8..]
            )
        } else {
            write!(f, "SignOutput({})", hex_str)
        }
    }
}

/// Sign `message` with a serialized private key.
///
/// The key length is checked first. If it is not exactly the parameter
/// set's private key size, this fails with
/// [`WalletError::InvalidPrivateKeyEncoding`](crate::WalletError::InvalidPrivateKeyEncoding)
/// and nothing is signed.
///
/// # Example
///
/// ```
/// use dlt_wallet::crypto::sign;
/// use dlt_wallet::WalletError;
///
/// let err = sign(&[0u8; 12], b"hello world").unwrap_err();
/// assert!(matches!(err, WalletError::InvalidPrivateKeyEncoding { .. }));
/// ```
pub fn sign(private_key: &[u8], message: &[u8]) -> WalletResult<SignOutput> {
    let key = PrivateKey::try_from_slice(private_key)?;
    let mut signing_key = key.to_signing_key();

    let signature = signing_key.sign(message).to_vec();
    signing_key.bytes.zeroize();

    tracing::debug!(
        message_len = message.len(),
        signature_len = signature.len(),
        "message signed"
    );

    Ok(SignOutput {
        signature_hex: hex::encode(&signature),
        signature,
    })
}

/// Verify a signature against a serialized public key.
///
/// Returns `false` for any failure: wrong key length, wrong signature
/// length, malformed hints, or a signature that does not verify.
/// Callers get a yes/no answer, not an oracle.
pub fn verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
    let Ok(key) = PublicKey::try_from_slice(public_key) else {
        return false;
    };
    if signature.len() != SIGNATURE_LENGTH {
        return false;
    }
    key.to_verifying_key().verify(message, signature)
}
