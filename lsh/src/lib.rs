//! Locality-sensitive hashing of token sequences into 64-bit fingerprints.
#![deny(missing_docs)]

pub mod simhash;

pub use simhash::SimHasher;

/// Number of bits in a fingerprint.
pub const FINGERPRINT_BITS: usize = 64;

/// Seed used when the caller does not supply one.
pub const DEFAULT_SEED: u64 = 0;

/// Hashes a token into 64 bits.
#[inline(always)]
pub fn hash_token<T>(token: T, seed: u64) -> u64
where
    T: AsRef<[u8]>,
{
    xxhash_rust::xxh3::xxh3_64_with_seed(token.as_ref(), seed)
}
