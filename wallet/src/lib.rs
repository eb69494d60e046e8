// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # DLT Wallet Core Library
//!
//! Turns a 24-word recovery phrase into a post-quantum wallet, the same
//! wallet on every device, without ever writing key material to disk.
//!
//! The whole library is one pipeline:
//!
//! ```text
//! mnemonic ──PBKDF2──▶ seed ──HKDF──▶ keystream ──Dilithium3──▶ keypair ──SHA-256──▶ address
//! ```
//!
//! Every arrow has fixed parameters (iteration count, salts, domain string,
//! output length). Change any of them and users silently get a different,
//! unrecoverable wallet. They all live in [`config`] for that reason.
//!
//! ## Architecture
//!
//! - **config**: Wallet constants. The contract with every past user.
//! - **crypto**: Seed stretching, the lazy keystream, hashing, signing.
//! - **identity**: Mnemonics, keypair generation, addresses.
//! - **ops**: The six boundary operations with typed, tagged results.
//! - **error**: One error enum for the whole crate.
//!
//! Nothing in here keeps state between calls. Every operation is a pure
//! function of its inputs, so callers may run them on as many threads as
//! they like.
//!
//! # Examples
//!
//! ```
//! use dlt_wallet::identity::{checksum_address, derive_keys};
//! use dlt_wallet::crypto::{sign, verify};
//!
//! let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon \
//!               abandon abandon abandon abandon abandon abandon abandon abandon \
//!               abandon abandon abandon abandon abandon abandon abandon art";
//! let wallet = derive_keys(phrase).unwrap();
//! assert_eq!(wallet.address.len(), 40);
//! assert!(checksum_address(&wallet.address).starts_with("dlt1"));
//!
//! let signed = sign(wallet.keypair.private_key.as_bytes(), b"hello world").unwrap();
//! assert!(verify(wallet.keypair.public_key.as_bytes(), b"hello world", &signed.signature));
//! ```

pub mod config;
pub mod crypto;
pub mod error;
pub mod identity;
pub mod ops;

pub use error::{WalletError, WalletResult};
