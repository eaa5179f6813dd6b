//! Fingerprints of extracted texts.
use lsh::SimHasher;

use crate::feature::FeatureExtractor;

/// Why a document has no fingerprint.
///
/// Excluded documents take part in no pair, and never abort a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum Exclusion {
    /// The content extraction service returned no text.
    #[error("no text was extracted")]
    ExtractionFailure,
    /// The text has no token.
    #[error("the text has no token")]
    NoContent,
}

/// Computes simhash fingerprints of texts.
#[derive(Clone, Copy, Debug, Default)]
pub struct Fingerprinter {
    extractor: FeatureExtractor,
    hasher: SimHasher,
}

impl Fingerprinter {
    /// Creates an instance whose token hashes use `seed`,
    /// or [`lsh::DEFAULT_SEED`] if `None`.
    pub const fn new(seed: Option<u64>) -> Self {
        let seed = match seed {
            Some(seed) => seed,
            None => lsh::DEFAULT_SEED,
        };
        Self {
            extractor: FeatureExtractor::new(),
            hasher: SimHasher::new(seed),
        }
    }

    /// Gets the seed of token hashes.
    pub const fn seed(&self) -> u64 {
        self.hasher.seed()
    }

    /// Computes the fingerprint of an extracted text.
    ///
    /// # Errors
    ///
    /// [`Exclusion::ExtractionFailure`] if `text` is `None`, and
    /// [`Exclusion::NoContent`] if it has no token.
    pub fn fingerprint(&self, text: Option<&str>) -> Result<u64, Exclusion> {
        let text = text.ok_or(Exclusion::ExtractionFailure)?;
        self.hasher
            .fingerprint(self.extractor.tokens(text))
            .ok_or(Exclusion::NoContent)
    }
}

/// Computes the fingerprint of an extracted text with the default seed,
/// returning it with `true`, or `(0, false)` if there is none.
///
/// # Examples
///
/// ```
/// use find_dupsite::compute_fingerprint;
///
/// let (x, present) = compute_fingerprint(Some("the quick brown fox"));
/// assert!(present);
/// assert_eq!(compute_fingerprint(Some("the quick brown fox")), (x, true));
/// assert_eq!(compute_fingerprint(Some("  ")), (0, false));
/// assert_eq!(compute_fingerprint(None), (0, false));
/// ```
pub fn compute_fingerprint(text: Option<&str>) -> (u64, bool) {
    match Fingerprinter::default().fingerprint(text) {
        Ok(fp) => (fp, true),
        Err(_) => (0, false),
    }
}
