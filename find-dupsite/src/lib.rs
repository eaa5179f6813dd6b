//! Near-duplicate detection of page texts hosted on different sites.
//!
//! Each document's text is split into whitespace-delimited tokens and summarized into
//! a 64-bit simhash fingerprint. Every pair of documents allowed by a [`PairingMode`]
//! is then scored by the Hamming distance between their fingerprints,
//! converted into a duplication rate in `[0, 100]`.
//! The score is a heuristic for lexical overlap, not an exact similarity.
//!
//! # Examples
//!
//! ```
//! use find_dupsite::{compare_all, DocumentRecord, PairingMode};
//!
//! let documents = vec![
//!     DocumentRecord::new("https://a.com/news", Some("the quick brown fox".to_string())),
//!     DocumentRecord::new("https://b.com/copy", Some("the quick brown fox".to_string())),
//!     DocumentRecord::new("https://b.com/other", None),
//! ];
//! let pairs = compare_all(&documents, PairingMode::CrossHostOnly);
//! assert_eq!(pairs.len(), 1);
//! assert_eq!(pairs[0].source, "https://a.com/news");
//! assert_eq!(pairs[0].target, "https://b.com/copy");
//! assert_eq!(pairs[0].hamming_distance, 0);
//! assert_eq!(pairs[0].duplication_rate, 100.);
//! ```
#![deny(missing_docs)]

pub mod compare;
pub mod document;
pub mod errors;
pub mod feature;
pub mod fingerprint;
pub mod report;
pub mod searcher;

pub use compare::{compare_all, duplication_rate, DocumentPair, PairingMode};
pub use document::DocumentRecord;
pub use fingerprint::{compute_fingerprint, Exclusion, Fingerprinter};
pub use report::{DocumentRow, Report};
pub use searcher::DupSearcher;
