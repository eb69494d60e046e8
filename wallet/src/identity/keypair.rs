//! # Keypair Generation
//!
//! Dilithium3 (CRYSTALS-Dilithium round 3, mode 3) keypairs generated from
//! the wallet keystream, and the full mnemonic-to-wallet pipeline built on
//! top of them.
//!
//! ## One stream, one generation
//!
//! [`generate_keypair`] takes the keystream by `&mut`, so the borrow checker
//! guarantees nothing else draws from it while generation runs. Whatever the
//! generator needs comes from the stream in order. If the stream cannot
//! supply it, generation fails hard: retrying would need a different stream,
//! and a different stream is a different wallet.
//!
//! ## Serialization
//!
//! Keys are carried in their packed round-3 encodings, the same bytes any
//! other Dilithium3 implementation imports. [`PrivateKey`]
//! zeroizes on drop and never prints its bytes. Serializing it is an
//! explicit `as_bytes()` call, not something that happens because a struct
//! ended up inside a JSON response.

use crystals_dilithium::dilithium3;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::config::{KEYGEN_SEED_LENGTH, PRIVATE_KEY_LENGTH, PUBLIC_KEY_LENGTH};
use crate::crypto::keystream::Keystream;
use crate::crypto::seed::derive_seed;
use crate::error::{WalletError, WalletResult};
use crate::identity::address::derive_address;

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// Encoded Dilithium3 public key. Safe to share, log, and hash into an
/// address.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PublicKey {
    bytes: Vec<u8>,
}

impl PublicKey {
    /// Parse an encoded public key, checking only its length.
    pub fn try_from_slice(bytes: &[u8]) -> WalletResult<Self> {
        if bytes.len() != PUBLIC_KEY_LENGTH {
            return Err(WalletError::InvalidPublicKeyEncoding {
                expected: PUBLIC_KEY_LENGTH,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    /// Borrow the encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// The raw (unchecksummed) wallet address for this key.
    pub fn address(&self) -> String {
        derive_address(&self.bytes)
    }

    /// Hand the bytes to the primitive's verifying key type.
    pub fn to_verifying_key(&self) -> dilithium3::PublicKey {
        // Length was checked on construction.
        dilithium3::PublicKey::from_bytes(&self.bytes)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.to_hex()[..16])
    }
}

// ---------------------------------------------------------------------------
// PrivateKey
// ---------------------------------------------------------------------------

/// Encoded Dilithium3 private key.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    bytes: Vec<u8>,
}

impl PrivateKey {
    /// Parse an encoded private key.
    ///
    /// Any length other than the parameter set's signing key size is a
    /// data-integrity failure, reported before any key material is decoded.
    pub fn try_from_slice(bytes: &[u8]) -> WalletResult<Self> {
        if bytes.len() != PRIVATE_KEY_LENGTH {
            return Err(WalletError::InvalidPrivateKeyEncoding {
                expected: PRIVATE_KEY_LENGTH,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    /// Borrow the encoded bytes. Handle with care.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Copy the bytes into the primitive's signing key type.
    ///
    /// The copy is not zeroized on drop. Callers wipe `bytes` once they are
    /// done signing.
    pub fn to_signing_key(&self) -> dilithium3::SecretKey {
        dilithium3::SecretKey::from_bytes(&self.bytes)
    }
}

impl Clone for PrivateKey {
    /// Allowed, but every copy is one more buffer to protect.
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
        }
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey(<redacted>)")
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// A generated keypair in canonical encodings.
#[derive(Clone)]
pub struct DerivedKeypair {
    pub public_key: PublicKey,
    pub private_key: PrivateKey,
}

impl fmt::Debug for DerivedKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DerivedKeypair(pub={:?})", self.public_key)
    }
}

/// Generate a Dilithium3 keypair from the keystream.
///
/// Exactly 32 bytes are drawn from the stream's current position and used
/// as the round-3 key generation seed, which the primitive expands with
/// SHAKE-256 into rho, rho' and key. The caller must hand in a freshly
/// constructed stream to reproduce a wallet. A stream that cannot supply the bytes fails the call with
/// [`WalletError::KeyGenerationError`].
pub fn generate_keypair(stream: &mut Keystream) -> WalletResult<DerivedKeypair> {
    let mut xi = Zeroizing::new([0u8; KEYGEN_SEED_LENGTH]);
    stream
        .fill(&mut xi[..])
        .map_err(|e| WalletError::KeyGenerationError(e.to_string()))?;

    let mut keypair = dilithium3::Keypair::generate(Some(&xi[..]));

    let public_key = PublicKey {
        bytes: keypair.public.bytes.to_vec(),
    };
    let private_key = PrivateKey {
        bytes: keypair.secret.bytes.to_vec(),
    };
    keypair.secret.bytes.zeroize();

    tracing::debug!(drawn = stream.position(), "keypair generated");

    Ok(DerivedKeypair {
        public_key,
        private_key,
    })
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Everything `derive_keys` hands back: the keypair and its raw address.
#[derive(Debug, Clone)]
pub struct DerivedWallet {
    pub keypair: DerivedKeypair,
    /// 40-char lowercase hex, unchecksummed and unprefixed. Use
    /// [`crate::identity::checksum_address`] for the display form.
    pub address: String,
}

/// Run the whole pipeline: mnemonic text to seed, seed to a fresh keystream,
/// keystream to keypair, public key to address.
///
/// The text is not checked against the BIP-39 wordlist; any non-empty text
/// derives a wallet. Call [`crate::identity::validate_mnemonic`] first if
/// that matters to you.
pub fn derive_keys(mnemonic: &str) -> WalletResult<DerivedWallet> {
    if mnemonic.is_empty() {
        return Err(WalletError::EmptyMnemonic);
    }

    let seed = derive_seed(mnemonic);
    let mut stream = Keystream::new(&seed);
    let keypair = generate_keypair(&mut stream)?;
    let address = keypair.public_key.address();

    tracing::debug!(address = %address, "wallet derived");

    Ok(DerivedWallet { keypair, address })
}
