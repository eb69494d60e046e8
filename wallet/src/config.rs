//! # Wallet Constants
//!
//! Every number and string that determines which keypair a mnemonic maps to
//! lives here. These are not tuning knobs. An existing wallet is only
//! recoverable while every value below stays exactly as it is, so treat a
//! change here as a new wallet format, not a refactor.

// ---------------------------------------------------------------------------
// Mnemonic
// ---------------------------------------------------------------------------

/// Words in a freshly generated recovery phrase.
pub const MNEMONIC_WORD_COUNT: usize = 24;

/// Entropy behind a 24-word phrase, in bytes (256 bits).
pub const MNEMONIC_ENTROPY_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Seed Derivation (PBKDF2-HMAC-SHA512)
// ---------------------------------------------------------------------------

/// PBKDF2 salt literal. Identical to the BIP-39 salt with an empty passphrase.
pub const SEED_SALT: &[u8] = b"mnemonic";

/// PBKDF2 iteration count.
pub const SEED_ITERATIONS: u32 = 2048;

/// Seed length in bytes.
pub const SEED_LENGTH: usize = 64;

// ---------------------------------------------------------------------------
// Keystream (HKDF-SHA256)
// ---------------------------------------------------------------------------

/// Domain-separation salt for the keypair keystream. No other derivation in
/// the wallet may reuse this string.
pub const KEYSTREAM_SALT: &str = "dilithium-v1-keypair";

/// HKDF `info` input. The keystream uses none.
pub const KEYSTREAM_INFO: &[u8] = b"";

/// SHA-256 output size, which is also the HKDF expand block size.
pub const KEYSTREAM_BLOCK_LENGTH: usize = 32;

/// RFC 5869 caps expand at 255 blocks.
pub const KEYSTREAM_MAX_BLOCKS: usize = 255;

/// Total bytes a single keystream can hand out (8160).
pub const KEYSTREAM_MAX_LENGTH: usize = KEYSTREAM_BLOCK_LENGTH * KEYSTREAM_MAX_BLOCKS;

// ---------------------------------------------------------------------------
// Signature Scheme (CRYSTALS-Dilithium round 3, mode 3)
// ---------------------------------------------------------------------------

/// Human-readable name of the parameter set.
pub const SIGNATURE_SCHEME: &str = "Dilithium3";

/// Bytes key generation draws from the keystream (the 32-byte key seed).
pub const KEYGEN_SEED_LENGTH: usize = 32;

/// Encoded public key length: rho || packed t1.
pub const PUBLIC_KEY_LENGTH: usize = 1952;

/// Encoded private key length: rho || key || tr || s1 || s2 || t0.
pub const PRIVATE_KEY_LENGTH: usize = 4000;

/// Encoded signature length.
pub const SIGNATURE_LENGTH: usize = 3293;

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

/// Bytes of SHA-256(public key) kept for the raw address.
pub const ADDRESS_LENGTH: usize = 20;

/// Raw address length in hex characters.
pub const ADDRESS_HEX_LENGTH: usize = ADDRESS_LENGTH * 2;

/// Prefix of the checksummed address form.
pub const ADDRESS_PREFIX: &str = "dlt1";

/// Digest bytes kept for the checksum.
pub const CHECKSUM_LENGTH: usize = 2;

/// Checksum length in hex characters.
pub const CHECKSUM_HEX_LENGTH: usize = CHECKSUM_LENGTH * 2;

/// Full checksummed address length: prefix + 40 + 4 = 48.
pub const CHECKSUMMED_ADDRESS_LENGTH: usize =
    ADDRESS_PREFIX.len() + ADDRESS_HEX_LENGTH + CHECKSUM_HEX_LENGTH;
