//! # Wallet Addresses
//!
//! Two representations, two explicit steps:
//!
//! ```text
//! raw          = hex(SHA-256(public_key)[..20])                    40 chars
//! checksummed  = "dlt1" || raw || hex(SHA-256("dlt1" || raw)[..2]) 48 chars
//! ```
//!
//! [`derive_keys`](crate::identity::derive_keys) only ever returns the raw
//! form. Which one a UI shows is the caller's decision, so both stay public
//! and neither is silently substituted for the other.
//!
//! The checksum hashes the prefixed *text*, not the address bytes. Four hex
//! characters is enough to catch a fat-fingered character with probability
//! 1 - 2^-16, which is the point: it is a typo detector, not a MAC.

use serde::{Deserialize, Serialize};

use crate::config::{
    ADDRESS_HEX_LENGTH, ADDRESS_LENGTH, ADDRESS_PREFIX, CHECKSUMMED_ADDRESS_LENGTH,
    CHECKSUM_LENGTH,
};
use crate::crypto::hash::{sha256_array, sha256_multi};
use crate::error::{WalletError, WalletResult};
use crate::identity::keypair::PublicKey;

/// Raw address of an encoded public key: the first 20 bytes of its SHA-256,
/// as 40 lowercase hex characters.
pub fn derive_address(public_key: &[u8]) -> String {
    let digest = sha256_array(public_key);
    hex::encode(&digest[..ADDRESS_LENGTH])
}

/// Checksummed, prefixed form of a raw address.
///
/// Defined for any input text; a raw address that is not 40 hex characters
/// still gets a prefix and a checksum. Use [`parse_checksummed_address`] to
/// go the other way with validation.
///
/// # Example
///
/// ```
/// use dlt_wallet::identity::checksum_address;
///
/// let addr = checksum_address("e3b0c44298fc1c149afbf4c8996fb92427ae41e4");
/// assert_eq!(addr, "dlt1e3b0c44298fc1c149afbf4c8996fb92427ae41e4332d");
/// ```
pub fn checksum_address(raw_hex: &str) -> String {
    format!("{ADDRESS_PREFIX}{raw_hex}{}", checksum(raw_hex))
}

fn checksum(raw_hex: &str) -> String {
    let digest = sha256_multi(&[ADDRESS_PREFIX.as_bytes(), raw_hex.as_bytes()]);
    hex::encode(&digest[..CHECKSUM_LENGTH])
}

/// Whether `text` is a well-formed raw address: 40 lowercase hex characters.
pub fn is_raw_address(text: &str) -> bool {
    text.len() == ADDRESS_HEX_LENGTH
        && text
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// Validate a checksummed address and return its raw part.
///
/// Checks, in order: the `dlt1` prefix, the total length of 48, that the
/// body is a lowercase raw address, and that the checksum matches.
pub fn parse_checksummed_address(text: &str) -> WalletResult<String> {
    let Some(rest) = text.strip_prefix(ADDRESS_PREFIX) else {
        return Err(WalletError::InvalidAddress(format!(
            "missing {ADDRESS_PREFIX} prefix"
        )));
    };
    if text.len() != CHECKSUMMED_ADDRESS_LENGTH {
        return Err(WalletError::InvalidAddress(format!(
            "expected {CHECKSUMMED_ADDRESS_LENGTH} characters, got {}",
            text.len()
        )));
    }
    let body_error =
        || WalletError::InvalidAddress("address body is not 40 lowercase hex characters".into());
    // Lengths above are in bytes; a multibyte character can straddle the split.
    let (raw, given) = rest
        .split_at_checked(ADDRESS_HEX_LENGTH)
        .ok_or_else(body_error)?;
    if !is_raw_address(raw) {
        return Err(body_error());
    }
    if checksum(raw) != given {
        return Err(WalletError::InvalidAddress("checksum mismatch".into()));
    }
    Ok(raw.to_string())
}

/// The presentation triple a wallet UI keeps for an account.
///
/// Everything in here is public information. The private key is deliberately
/// absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSummary {
    /// Raw 40-char address.
    pub address: String,
    /// `dlt1`-prefixed, checksummed address.
    pub checksum_address: String,
    /// Hex of the encoded public key.
    pub public_key_hex: String,
}

impl WalletSummary {
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        let address = public_key.address();
        Self {
            checksum_address: checksum_address(&address),
            public_key_hex: public_key.to_hex(),
            address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_KEY_ADDRESS: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4";

    #[test]
    fn raw_address_is_truncated_sha256() {
        assert_eq!(derive_address(b""), EMPTY_KEY_ADDRESS);
    }

    #[test]
    fn raw_address_shape() {
        let addr = derive_address(&[0x42u8; 1952]);
        assert!(is_raw_address(&addr));
    }

    #[test]
    fn checksum_known_vectors() {
        assert_eq!(
            checksum_address(EMPTY_KEY_ADDRESS),
            "dlt1e3b0c44298fc1c149afbf4c8996fb92427ae41e4332d"
        );
        assert_eq!(
            checksum_address(&"00".repeat(20)),
            "dlt100000000000000000000000000000000000000007d2b"
        );
    }

    #[test]
    fn checksum_is_defined_for_empty_input() {
        assert_eq!(checksum_address(""), "dlt140df");
    }

    #[test]
    fn checksummed_shape() {
        let addr = checksum_address(EMPTY_KEY_ADDRESS);
        assert_eq!(addr.len(), CHECKSUMMED_ADDRESS_LENGTH);
        assert!(addr.starts_with("dlt1"));
        assert!(addr[44..]
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
    }

    #[test]
    fn checksum_is_stable() {
        assert_eq!(
            checksum_address(EMPTY_KEY_ADDRESS),
            checksum_address(EMPTY_KEY_ADDRESS)
        );
    }

    #[test]
    fn parse_roundtrip() {
        let addr = checksum_address(EMPTY_KEY_ADDRESS);
        assert_eq!(parse_checksummed_address(&addr).unwrap(), EMPTY_KEY_ADDRESS);
    }

    #[test]
    fn parse_rejects_missing_prefix() {
        let err = parse_checksummed_address("xyz1e3b0c44298fc1c149afbf4c8996fb92427ae41e4332d")
            .unwrap_err();
        assert!(err.to_string().contains("prefix"));
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert!(parse_checksummed_address("dlt1e3b0c442").is_err());
    }

    #[test]
    fn parse_rejects_uppercase_body() {
        let upper = format!("dlt1{}332d", EMPTY_KEY_ADDRESS.to_uppercase());
        let err = parse_checksummed_address(&upper).unwrap_err();
        assert!(err.to_string().contains("lowercase"));
    }

    #[test]
    fn parse_rejects_multibyte_character_at_the_split() {
        // 48 bytes, with a two-byte character spanning bytes 43..45 of the text.
        let text = format!("dlt1{}\u{e9}{}", "a".repeat(39), "bcd");
        assert_eq!(text.len(), CHECKSUMMED_ADDRESS_LENGTH);
        let err = parse_checksummed_address(&text).unwrap_err();
        assert!(err.to_string().contains("lowercase hex"));
    }

    #[test]
    fn parse_rejects_multibyte_character_in_the_checksum() {
        let text = format!("dlt1{}a\u{e9}b", EMPTY_KEY_ADDRESS);
        assert_eq!(text.len(), CHECKSUMMED_ADDRESS_LENGTH);
        assert_eq!(
            parse_checksummed_address(&text).unwrap_err(),
            WalletError::InvalidAddress("checksum mismatch".into())
        );
    }

    #[test]
    fn parse_rejects_bad_checksum() {
        let err =
            parse_checksummed_address("dlt1e3b0c44298fc1c149afbf4c8996fb92427ae41e40000").unwrap_err();
        assert_eq!(err, WalletError::InvalidAddress("checksum mismatch".into()));
    }

    #[test]
    fn parse_catches_a_typo_in_the_body() {
        // Swap the first character of the body: e -> f.
        let err = parse_checksummed_address("dlt1f3b0c44298fc1c149afbf4c8996fb92427ae41e4332d")
            .unwrap_err();
        assert_eq!(err, WalletError::InvalidAddress("checksum mismatch".into()));
    }

    #[test]
    fn raw_address_predicate() {
        assert!(is_raw_address(EMPTY_KEY_ADDRESS));
        assert!(!is_raw_address(&EMPTY_KEY_ADDRESS[..39]));
        assert!(!is_raw_address(&EMPTY_KEY_ADDRESS.replace('e', "g")));
    }

    #[test]
    fn summary_fields_are_consistent() {
        let pk = PublicKey::try_from_slice(&[0x11u8; 1952]).unwrap();
        let summary = WalletSummary::from_public_key(&pk);
        assert_eq!(summary.address, derive_address(pk.as_bytes()));
        assert_eq!(summary.checksum_address, checksum_address(&summary.address));
        assert_eq!(summary.public_key_hex.len(), 1952 * 2);
    }
}
