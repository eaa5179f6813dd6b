//! Simhash for near-duplicate detection of token sequences.
use crate::FINGERPRINT_BITS;

/// [Simhash](https://dl.acm.org/doi/10.1145/509907.509965) over unweighted tokens.
///
/// Every token occurrence votes on each of the [`FINGERPRINT_BITS`] positions
/// with its hash bit, so repeated tokens weigh more.
/// Documents sharing many tokens end up with fingerprints of small Hamming distance,
/// but the distance is only a heuristic proxy for lexical overlap.
#[derive(Clone, Copy, Debug)]
pub struct SimHasher {
    seed: u64,
}

impl Default for SimHasher {
    fn default() -> Self {
        Self::new(crate::DEFAULT_SEED)
    }
}

impl SimHasher {
    /// Creates an instance whose token hashes use `seed`.
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Gets the seed of token hashes.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Computes the fingerprint of a token sequence.
    ///
    /// Returns `None` if the sequence has no tokens,
    /// instead of an all-zero fingerprint.
    ///
    /// # Examples
    ///
    /// ```
    /// use lsh::SimHasher;
    ///
    /// let hasher = SimHasher::new(42);
    /// let x = hasher.fingerprint("the quick brown fox".split_whitespace()).unwrap();
    /// let y = hasher.fingerprint("the quick brown fox".split_whitespace()).unwrap();
    /// assert_eq!(x, y);
    /// assert_eq!(hasher.fingerprint(Vec::<&str>::new()), None);
    /// ```
    pub fn fingerprint<I, T>(&self, tokens: I) -> Option<u64>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let seed = self.seed;
        Self::accumulate(
            tokens
                .into_iter()
                .map(|token| crate::hash_token(token, seed)),
        )
    }

    /// Computes the fingerprint from already hashed tokens.
    ///
    /// Returns `None` if `hashes` is empty.
    pub fn fingerprint_hashed(&self, hashes: &[u64]) -> Option<u64> {
        Self::accumulate(hashes.iter().copied())
    }

    fn accumulate<I>(hashes: I) -> Option<u64>
    where
        I: Iterator<Item = u64>,
    {
        let mut counters = [0i64; FINGERPRINT_BITS];
        let mut num_tokens = 0usize;
        for h in hashes {
            for (j, c) in counters.iter_mut().enumerate() {
                if (h >> j) & 1 == 1 {
                    *c += 1;
                } else {
                    *c -= 1;
                }
            }
            num_tokens += 1;
        }
        if num_tokens == 0 {
            return None;
        }
        Some(
            counters
                .iter()
                .enumerate()
                .fold(0, |acc, (j, &c)| if c > 0 { acc | (1 << j) } else { acc }),
        )
    }
}
