//! # Hashing Utilities
//!
//! SHA-256 is the only hash the address scheme uses, both for the raw
//! address (over the encoded public key) and for the checksum (over the
//! prefixed hex text).

use sha2::{Digest, Sha256};

/// Compute the SHA-256 hash of the input data.
///
/// # Example
///
/// ```
/// use dlt_wallet::crypto::sha256;
///
/// let hash = sha256(b"dlt wallet");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> Vec<u8> {
    sha256_array(data).to_vec()
}

/// Compute the SHA-256 hash and return a fixed-size array.
pub fn sha256_array(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash several byte slices as if they were concatenated.
///
/// The checksum hashes `prefix || raw_hex`; feeding the parts one after
/// the other avoids building the joined string first.
pub fn sha256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}
