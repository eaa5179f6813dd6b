//! Pairing policies and scored document pairs.
use std::fmt;
use std::str::FromStr;

use all_pairs_hamming::similarity_percent;
use serde::{Deserialize, Serialize};

use crate::document::DocumentRecord;
use crate::searcher::DupSearcher;

/// Which candidate pairs are compared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PairingMode {
    /// Only documents of different hosts.
    ///
    /// Host values are compared exactly, so that `"A.com"` and `"a.com"` differ;
    /// hosts derived from URLs are already lowercased.
    /// A document without a host is never on the same host as any other,
    /// so it is compared with every document.
    #[default]
    CrossHostOnly,
    /// Every two documents, regardless of their hosts.
    AllPairs,
}

impl PairingMode {
    /// Checks if two documents with the given hosts are compared.
    ///
    /// Hosts are compared exactly; a missing or empty host equals nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use find_dupsite::PairingMode;
    ///
    /// let mode = PairingMode::CrossHostOnly;
    /// assert!(mode.accepts(Some("a.com"), Some("b.com")));
    /// assert!(!mode.accepts(Some("a.com"), Some("a.com")));
    /// assert!(mode.accepts(None, None));
    /// assert!(PairingMode::AllPairs.accepts(Some("a.com"), Some("a.com")));
    /// ```
    pub fn accepts(&self, lhs: Option<&str>, rhs: Option<&str>) -> bool {
        match self {
            Self::AllPairs => true,
            Self::CrossHostOnly => match (non_empty(lhs), non_empty(rhs)) {
                (Some(x), Some(y)) => x != y,
                _ => true,
            },
        }
    }
}

fn non_empty(host: Option<&str>) -> Option<&str> {
    host.filter(|h| !h.is_empty())
}

impl FromStr for PairingMode {
    type Err = &'static str;
    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "cross-host" => Ok(Self::CrossHostOnly),
            "all" => Ok(Self::AllPairs),
            _ => Err("Could not parse a pairing mode (expected cross-host or all)"),
        }
    }
}

impl fmt::Display for PairingMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::CrossHostOnly => f.write_str("cross-host"),
            Self::AllPairs => f.write_str("all"),
        }
    }
}

/// A compared pair of documents.
///
/// `source` is the document listed earlier in the input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentPair {
    /// URL of the earlier document.
    pub source: String,
    /// URL of the later document.
    pub target: String,
    /// Number of differing bits between the fingerprints, in `[0, 64]`.
    pub hamming_distance: u32,
    /// Duplication rate in `[0, 100]`.
    pub duplication_rate: f64,
}

impl DocumentPair {
    /// Names of the serialized fields, in order.
    pub const COLUMNS: [&'static str; 4] =
        ["source", "target", "hamming_distance", "duplication_rate"];

    pub(crate) fn new(source: String, target: String, hamming_distance: u32) -> Self {
        Self {
            source,
            target,
            hamming_distance,
            duplication_rate: duplication_rate(hamming_distance),
        }
    }
}

/// Converts a Hamming distance between fingerprints into a duplication rate,
/// i.e., `(1 - dist / 64) * 100`.
///
/// # Examples
///
/// ```
/// use find_dupsite::duplication_rate;
///
/// assert_eq!(duplication_rate(0), 100.);
/// assert_eq!(duplication_rate(8), 87.5);
/// assert_eq!(duplication_rate(64), 0.);
/// ```
pub fn duplication_rate(hamming_distance: u32) -> f64 {
    similarity_percent::<u64>(hamming_distance as usize)
}

/// Compares all the documents under `mode`, returning the pairs in the order of
/// input indices.
///
/// Documents without a fingerprint are skipped silently.
/// URLs are assumed to be unique; use [`DupSearcher`] to have them checked.
pub fn compare_all(documents: &[DocumentRecord], mode: PairingMode) -> Vec<DocumentPair> {
    DupSearcher::new(None)
        .pairing(mode)
        .index(documents)
        .all_pairs()
}
