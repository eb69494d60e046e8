//! Mnemonic phrases.
//!
//! Generation and checksum validation are delegated to the `bip39` crate.
//! The rest of the wallet treats a mnemonic as opaque UTF-8 text.

use bip39::{Language, Mnemonic};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::config::{MNEMONIC_ENTROPY_LENGTH, MNEMONIC_WORD_COUNT};
use crate::error::{WalletError, WalletResult};

/// Generate a fresh 24-word English mnemonic from OS entropy.
pub fn generate_mnemonic() -> WalletResult<String> {
    let mut entropy = Zeroizing::new([0u8; MNEMONIC_ENTROPY_LENGTH]);
    OsRng
        .try_fill_bytes(&mut entropy[..])
        .map_err(|e| WalletError::EntropyError(e.to_string()))?;

    let mnemonic = Mnemonic::from_entropy(&entropy[..])
        .map_err(|e| WalletError::MnemonicEncodingError(e.to_string()))?;

    tracing::debug!(words = MNEMONIC_WORD_COUNT, "mnemonic generated");
    Ok(mnemonic.to_string())
}

/// Whether `text` is a checksum-valid English BIP-39 mnemonic.
///
/// Any word count the standard allows is accepted, not just 24. Malformed
/// input is simply invalid.
pub fn validate_mnemonic(text: &str) -> bool {
    Mnemonic::parse_in_normalized(Language::English, text).is_ok()
}
