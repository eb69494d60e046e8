//! # Seed Derivation
//!
//! Stretches mnemonic text into a 64-byte seed with PBKDF2-HMAC-SHA512,
//! salt `"mnemonic"`, 2048 iterations.
//!
//! The password is the text's raw UTF-8 bytes. There is no Unicode
//! normalization and no passphrase, so for English phrases the result is
//! the standard BIP-39 seed with an empty passphrase. Any text is accepted;
//! whether it is a *valid* mnemonic is a separate question answered by
//! [`crate::identity::validate_mnemonic`].

use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::config::{SEED_ITERATIONS, SEED_LENGTH, SEED_SALT};

/// The 64-byte stretched seed.
///
/// Zeroized on drop, not `Clone`, and redacted in `Debug`. It exists for the
/// duration of one derivation and is then gone.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Seed {
    bytes: [u8; SEED_LENGTH],
}

impl Seed {
    /// Borrow the raw seed bytes.
    pub fn as_bytes(&self) -> &[u8; SEED_LENGTH] {
        &self.bytes
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed(<redacted>)")
    }
}

/// Derive the wallet seed from mnemonic text.
///
/// Infallible: PBKDF2 with a fixed output length has no error path.
pub fn derive_seed(mnemonic: &str) -> Seed {
    let mut bytes = [0u8; SEED_LENGTH];
    pbkdf2_hmac::<Sha512>(mnemonic.as_bytes(), SEED_SALT, SEED_ITERATIONS, &mut bytes);
    tracing::trace!(iterations = SEED_ITERATIONS, "seed derived");
    Seed { bytes }
}
