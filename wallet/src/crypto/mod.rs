//! # Cryptographic Primitives
//!
//! The first half of the pipeline and the signer:
//!
//! - **seed**: PBKDF2-HMAC-SHA512 stretching of the mnemonic text.
//! - **keystream**: HKDF-SHA256 over the seed, exposed as a lazy byte reader.
//! - **hash**: the SHA-256 helpers addresses are built from.
//! - **signatures**: Dilithium3 signing and verification over raw bytes.
//!
//! Everything here wraps RustCrypto hashes and KDFs, plus the
//! `crystals-dilithium` lattice primitive. None of it is novel cryptography,
//! and it should stay that way.

pub mod hash;
pub mod keystream;
pub mod seed;
pub mod signatures;

pub use hash::{sha256, sha256_array};
pub use keystream::Keystream;
pub use seed::{derive_seed, Seed};
pub use signatures::{sign, verify, SignOutput};
