//! # Wallet Identity
//!
//! Everything that turns a mnemonic into a wallet you can show and use:
//!
//! - **mnemonic**: generate and validate BIP-39 phrases.
//! - **keypair**: Dilithium3 keys from the wallet keystream, and the
//!   `derive_keys` pipeline.
//! - **address**: raw and checksummed addresses.
//!
//! Derivation is a single fixed path. There is no account tree and no
//! passphrase: one mnemonic, one keypair, one address.

pub mod address;
pub mod keypair;
pub mod mnemonic;

pub use address::{
    checksum_address, derive_address, is_raw_address, parse_checksummed_address, WalletSummary,
};
pub use keypair::{
    derive_keys, generate_keypair, DerivedKeypair, DerivedWallet, PrivateKey, PublicKey,
};
pub use mnemonic::{generate_mnemonic, validate_mnemonic};
