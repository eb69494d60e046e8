//! # Keystream Expander
//!
//! HKDF-SHA256 over the 64-byte seed, with the fixed domain salt
//! `"dilithium-v1-keypair"` and no info, exposed as a consumable byte
//! stream rather than a precomputed buffer.
//!
//! ## Why a stream?
//!
//! The key generator decides how many bytes it needs, and a generator with
//! rejection sampling cannot know that in advance. So the extract step runs
//! once up front and the expand step runs on demand, one 32-byte block at a
//! time:
//!
//! ```text
//! PRK  = HMAC(salt, seed)
//! T(i) = HMAC(PRK, T(i-1) || info || i)      i = 1..=255
//! ```
//!
//! Bytes come out in exactly that order. Two reads from one `Keystream` never
//! see the same bytes; a new `Keystream` from the same seed replays the
//! sequence from byte zero. Any split of reads yields the same bytes as one
//! RFC 5869 `expand` of the combined length.
//!
//! ## The 8160-byte wall
//!
//! RFC 5869 stops at 255 blocks. A read that would cross the wall is refused
//! with [`WalletError::KeystreamExhausted`] and the stream stays exhausted.
//! Handing out a short read, or wrapping the counter, would both quietly
//! change which key a seed produces.

use hkdf::Hkdf;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;
use zeroize::Zeroize;

use crate::config::{
    KEYSTREAM_BLOCK_LENGTH, KEYSTREAM_INFO, KEYSTREAM_MAX_LENGTH, KEYSTREAM_SALT,
};
use crate::crypto::seed::Seed;
use crate::error::{WalletError, WalletResult};

type HmacSha256 = Hmac<Sha256>;

/// Lazy HKDF-SHA256 output reader.
///
/// Not `Clone`: a copy would let two consumers draw the same bytes, which is
/// exactly what the keypair derivation must never do.
pub struct Keystream {
    /// HMAC keyed with the PRK. Cloned fresh for every block.
    prk_mac: HmacSha256,
    info: Vec<u8>,
    /// The most recent block T(counter).
    block: [u8; KEYSTREAM_BLOCK_LENGTH],
    /// Index of `block`; 0 before the first block is computed.
    counter: u8,
    /// Bytes of `block` already handed out.
    offset: usize,
    /// Total bytes handed out.
    position: usize,
    exhausted: bool,
}

impl Keystream {
    /// Build the keypair keystream for a seed.
    pub fn new(seed: &Seed) -> Self {
        Self::with_salt(KEYSTREAM_SALT.as_bytes(), seed.as_bytes(), KEYSTREAM_INFO)
    }

    /// Build a keystream with explicit HKDF inputs.
    ///
    /// Wallet derivation always goes through [`Keystream::new`]. This exists
    /// so the construction can be checked against the RFC 5869 vectors.
    pub(crate) fn with_salt(salt: &[u8], ikm: &[u8], info: &[u8]) -> Self {
        let (mut prk, _) = Hkdf::<Sha256>::extract(Some(salt), ikm);
        let prk_mac =
            HmacSha256::new_from_slice(&prk).expect("HMAC accepts keys of any length");
        prk.as_mut_slice().zeroize();

        Self {
            prk_mac,
            info: info.to_vec(),
            block: [0u8; KEYSTREAM_BLOCK_LENGTH],
            counter: 0,
            offset: KEYSTREAM_BLOCK_LENGTH,
            position: 0,
            exhausted: false,
        }
    }

    /// Fill `out` with the next `out.len()` bytes of the stream.
    ///
    /// Fails without writing anything if the read would cross the HKDF
    /// output bound; the stream is unusable afterwards.
    pub fn fill(&mut self, out: &mut [u8]) -> WalletResult<()> {
        let remaining = self.remaining();
        if self.exhausted || out.len() > remaining {
            self.exhausted = true;
            tracing::debug!(
                requested = out.len(),
                remaining,
                "keystream read refused"
            );
            return Err(WalletError::KeystreamExhausted {
                requested: out.len(),
                remaining,
            });
        }

        let mut written = 0;
        while written < out.len() {
            if self.offset == KEYSTREAM_BLOCK_LENGTH {
                self.next_block();
            }
            let take = (KEYSTREAM_BLOCK_LENGTH - self.offset).min(out.len() - written);
            out[written..written + take]
                .copy_from_slice(&self.block[self.offset..self.offset + take]);
            self.offset += take;
            written += take;
        }
        self.position += out.len();
        Ok(())
    }

    /// Bytes handed out so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes still available before the HKDF bound.
    pub fn remaining(&self) -> usize {
        KEYSTREAM_MAX_LENGTH - self.position
    }

    /// Whether a read has been refused. Once set it never clears.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    fn next_block(&mut self) {
        self.counter += 1;
        let mut mac = self.prk_mac.clone();
        if self.counter > 1 {
            mac.update(&self.block);
        }
        mac.update(&self.info);
        mac.update(&[self.counter]);
        self.block.copy_from_slice(&mac.finalize().into_bytes());
        self.offset = 0;
    }
}

impl Drop for Keystream {
    fn drop(&mut self) {
        self.block.zeroize();
    }
}

impl fmt::Debug for Keystream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keystream")
            .field("position", &self.position)
            .field("exhausted", &self.exhausted)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::seed::derive_seed;

    fn wallet_stream() -> Keystream {
        Keystream::new(&derive_seed("keystream test phrase"))
    }

    fn read(stream: &mut Keystream, n: usize) -> Vec<u8> {
        let mut buf = vec![0u8; n];
        stream.fill(&mut buf).unwrap();
        buf
    }

    #[test]
    fn rfc5869_case_1() {
        let ikm = [0x0bu8; 22];
        let salt = hex::decode("000102030405060708090a0b0c").unwrap();
        let info = hex::decode("f0f1f2f3f4f5f6f7f8f9").unwrap();
        let mut stream = Keystream::with_salt(&salt, &ikm, &info);
        assert_eq!(
            hex::encode(read(&mut stream, 42)),
            "3cb25f25faacd57a90434f64d0362f2a2d2d0a90cf1a5a4c5db02d56ecc4c5bf\
             34007208d5b887185865"
        );
    }

    #[test]
    fn rfc5869_case_3_empty_salt_and_info() {
        let ikm = [0x0bu8; 22];
        let mut stream = Keystream::with_salt(&[], &ikm, &[]);
        assert_eq!(
            hex::encode(read(&mut stream, 42)),
            "8da4e775a563c18f715f802a063c5a31b8a11f5c5ee1879ec3454e5f3c738d2d\
             9d201395faa4b61a96c8"
        );
    }

    #[test]
    fn full_stream_matches_bulk_expand() {
        let seed = derive_seed("bulk comparison");
        let mut expected = vec![0u8; KEYSTREAM_MAX_LENGTH];
        Hkdf::<Sha256>::new(Some(KEYSTREAM_SALT.as_bytes()), seed.as_bytes())
            .expand(KEYSTREAM_INFO, &mut expected)
            .unwrap();

        let mut stream = Keystream::new(&seed);
        assert_eq!(read(&mut stream, KEYSTREAM_MAX_LENGTH), expected);
        assert_eq!(stream.remaining(), 0);
    }

    #[test]
    fn chunking_does_not_change_the_sequence() {
        let bulk = read(&mut wallet_stream(), 500);

        let mut stream = wallet_stream();
        let mut chunked = Vec::new();
        for n in [1, 31, 32, 33, 7, 64, 100, 232] {
            chunked.extend(read(&mut stream, n));
        }
        assert_eq!(chunked, bulk);
        assert_eq!(stream.position(), 500);
    }

    #[test]
    fn consecutive_reads_do_not_repeat() {
        let mut stream = wallet_stream();
        let first = read(&mut stream, 32);
        let second = read(&mut stream, 32);
        assert_ne!(first, second);
    }

    #[test]
    fn fresh_stream_replays_from_start() {
        let mut a = wallet_stream();
        let mut b = wallet_stream();
        assert_eq!(read(&mut a, 96), read(&mut b, 96));
    }

    #[test]
    fn salt_separates_domains() {
        let seed = derive_seed("domain separation");
        let mut wallet = Keystream::new(&seed);
        let mut other = Keystream::with_salt(b"some-other-protocol", seed.as_bytes(), &[]);
        assert_ne!(read(&mut wallet, 32), read(&mut other, 32));
    }

    #[test]
    fn empty_read_is_a_no_op() {
        let mut stream = wallet_stream();
        stream.fill(&mut []).unwrap();
        assert_eq!(stream.position(), 0);
        assert!(!stream.is_exhausted());
    }

    #[test]
    fn read_past_bound_is_refused_and_latches() {
        let mut stream = wallet_stream();
        read(&mut stream, KEYSTREAM_MAX_LENGTH - 10);

        let mut buf = [0xAAu8; 11];
        let err = stream.fill(&mut buf).unwrap_err();
        assert_eq!(
            err,
            WalletError::KeystreamExhausted {
                requested: 11,
                remaining: 10
            }
        );
        // Nothing was written, and even a read that would have fit is refused now.
        assert_eq!(buf, [0xAAu8; 11]);
        assert!(stream.is_exhausted());
        assert!(stream.fill(&mut [0u8; 1]).is_err());
    }

    #[test]
    fn debug_hides_block_state() {
        let mut stream = wallet_stream();
        read(&mut stream, 5);
        let dbg = format!("{:?}", stream);
        assert!(dbg.contains("position: 5"));
        assert!(!dbg.contains("block"));
    }
}
