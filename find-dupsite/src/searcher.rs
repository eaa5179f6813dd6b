//! Searcher of near-duplicate documents across hosts.
use all_pairs_hamming::simple_join::Joined;
use all_pairs_hamming::SimpleJoiner;
use hashbrown::HashSet;
use rayon::prelude::*;

use crate::compare::{DocumentPair, PairingMode};
use crate::document::DocumentRecord;
use crate::errors::{FindDupsiteError, Result};
use crate::fingerprint::{Exclusion, Fingerprinter};
use crate::report::Report;

/// Eligible document, i.e., one with a fingerprint.
struct Entry {
    url: String,
    host: Option<String>,
}

/// Searcher of near-duplicate documents with 64-bit simhash.
///
/// # Examples
///
/// ```
/// use find_dupsite::{DocumentRecord, DupSearcher, PairingMode};
///
/// let town = "Welcome to Jimbocho, the town of books and curry!";
/// let city = "Welcome to Jimbocho, the city of books and curry!";
/// let documents = vec![
///     DocumentRecord::new("https://a.com/1", Some(town.to_string())),
///     DocumentRecord::new("https://a.com/2", Some(town.to_string())),
///     DocumentRecord::new("https://b.com/1", Some(city.to_string())),
///     DocumentRecord::new("https://c.com/1", None),
/// ];
///
/// let searcher = DupSearcher::new(Some(42))
///     .pairing(PairingMode::CrossHostOnly)
///     .build_fingerprints(&documents)
///     .unwrap();
/// assert_eq!(searcher.len(), 3);
///
/// let pairs = searcher.search_pairs().unwrap();
/// assert_eq!(pairs.len(), 2);
/// assert_eq!(pairs[0].source, "https://a.com/1");
/// assert_eq!(pairs[0].target, "https://b.com/1");
/// ```
pub struct DupSearcher {
    fingerprinter: Fingerprinter,
    pairing: PairingMode,
    max_distance: Option<u32>,
    shows_progress: bool,
    outcomes: Vec<Result<u64, Exclusion>>,
    entries: Vec<Entry>,
    joiner: SimpleJoiner<u64>,
}

impl DupSearcher {
    /// Creates an instance.
    ///
    /// # Arguments
    ///
    /// * `seed` - Seed value for token hashes. If `None`, [`lsh::DEFAULT_SEED`] is used,
    ///            so that fingerprints are reproducible across runs.
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            fingerprinter: Fingerprinter::new(seed),
            pairing: PairingMode::default(),
            max_distance: None,
            shows_progress: false,
            outcomes: vec![],
            entries: vec![],
            joiner: SimpleJoiner::new(),
        }
    }

    /// Sets the pairing mode (default: [`PairingMode::CrossHostOnly`]).
    pub fn pairing(mut self, mode: PairingMode) -> Self {
        self.pairing = mode;
        self
    }

    /// Reports only pairs whose Hamming distance is within `max_distance`.
    /// If `None` (default), all the compared pairs are reported.
    ///
    /// # Errors
    ///
    /// An error is returned if `max_distance` exceeds the number of fingerprint bits.
    pub fn max_distance(mut self, max_distance: Option<u32>) -> Result<Self> {
        if let Some(d) = max_distance {
            if d as usize > lsh::FINGERPRINT_BITS {
                return Err(FindDupsiteError::input(format!(
                    "Max distance must not exceed {}, but got {d}.",
                    lsh::FINGERPRINT_BITS
                )));
            }
        }
        self.max_distance = max_distance;
        Ok(self)
    }

    /// Logs the progress?
    pub fn shows_progress(mut self, yes: bool) -> Self {
        self.shows_progress = yes;
        self
    }

    /// Builds the fingerprints of input documents.
    ///
    /// Documents without text or without tokens are kept in [`Self::outcomes()`]
    /// but excluded from comparison.
    ///
    /// # Errors
    ///
    /// An error is returned if URLs are not unique.
    pub fn build_fingerprints(self, documents: &[DocumentRecord]) -> Result<Self> {
        check_unique_urls(documents)?;
        let outcomes = documents
            .iter()
            .enumerate()
            .map(|(i, doc)| {
                if self.shows_progress && (i + 1) % 1000 == 0 {
                    log::info!("Processed {} documents...", i + 1);
                }
                self.fingerprinter.fingerprint(doc.text())
            })
            .collect();
        Ok(self.with_outcomes(documents, outcomes))
    }

    /// Parallel version of [`Self::build_fingerprints()`].
    ///
    /// # Errors
    ///
    /// An error is returned if URLs are not unique.
    pub fn build_fingerprints_in_parallel(self, documents: &[DocumentRecord]) -> Result<Self> {
        check_unique_urls(documents)?;
        let fingerprinter = self.fingerprinter;
        // Collecting an indexed parallel iterator keeps the input order.
        let outcomes = documents
            .par_iter()
            .map(|doc| fingerprinter.fingerprint(doc.text()))
            .collect();
        Ok(self.with_outcomes(documents, outcomes))
    }

    /// Builds the fingerprints without checking URLs.
    pub(crate) fn index(self, documents: &[DocumentRecord]) -> Self {
        let outcomes = documents
            .iter()
            .map(|doc| self.fingerprinter.fingerprint(doc.text()))
            .collect();
        self.with_outcomes(documents, outcomes)
    }

    fn with_outcomes(
        mut self,
        documents: &[DocumentRecord],
        outcomes: Vec<Result<u64, Exclusion>>,
    ) -> Self {
        let mut joiner = SimpleJoiner::new().shows_progress(self.shows_progress);
        let mut entries = Vec::with_capacity(documents.len());
        for (doc, outcome) in documents.iter().zip(outcomes.iter()) {
            match outcome {
                Ok(fp) => {
                    joiner.add(*fp);
                    entries.push(Entry {
                        url: doc.url.clone(),
                        host: doc.host().map(str::to_string),
                    });
                }
                Err(e) => log::debug!("Excluded {}: {e}", doc.url),
            }
        }
        if self.shows_progress {
            log::info!(
                "Fingerprinted {} of {} documents",
                entries.len(),
                documents.len()
            );
        }
        self.outcomes = outcomes;
        self.entries = entries;
        self.joiner = joiner;
        self
    }

    /// Compares all the eligible documents under the pairing mode,
    /// returning the pairs in the order of input indices.
    ///
    /// # Errors
    ///
    /// An error is returned if the distance bound is invalid.
    pub fn search_pairs(&self) -> Result<Vec<DocumentPair>> {
        let accept = |i, j| self.accepts(i, j);
        let joined = match self.radius() {
            None => self.joiner.all_pairs(accept),
            Some(radius) => self
                .joiner
                .similar_pairs(radius, accept)
                .map_err(|e| FindDupsiteError::input(e.to_string()))?,
        };
        Ok(self.to_pairs(joined))
    }

    /// Parallel version of [`Self::search_pairs()`], producing the same results in the same order.
    ///
    /// # Errors
    ///
    /// An error is returned if the distance bound is invalid.
    pub fn search_pairs_in_parallel(&self) -> Result<Vec<DocumentPair>> {
        let accept = |i, j| self.accepts(i, j);
        let joined = match self.radius() {
            None => self.joiner.all_pairs_in_parallel(accept),
            Some(radius) => self
                .joiner
                .similar_pairs_in_parallel(radius, accept)
                .map_err(|e| FindDupsiteError::input(e.to_string()))?,
        };
        Ok(self.to_pairs(joined))
    }

    /// Compares all the eligible documents, ignoring the distance bound.
    pub(crate) fn all_pairs(&self) -> Vec<DocumentPair> {
        self.to_pairs(self.joiner.all_pairs(|i, j| self.accepts(i, j)))
    }

    /// Assembles the tables of documents and pairs.
    ///
    /// # Errors
    ///
    /// An error is returned if `documents` are not the ones fingerprinted.
    pub fn report(
        &self,
        documents: &[DocumentRecord],
        pairs: Vec<DocumentPair>,
    ) -> Result<Report> {
        Report::build(documents, &self.outcomes, pairs)
    }

    /// Gets the fingerprint or the exclusion of every input document, in the input order.
    pub fn outcomes(&self) -> &[Result<u64, Exclusion>] {
        &self.outcomes
    }

    /// Gets the active pairing mode.
    pub const fn pairing_mode(&self) -> PairingMode {
        self.pairing
    }

    /// Gets the seed of token hashes.
    pub const fn seed(&self) -> u64 {
        self.fingerprinter.seed()
    }

    /// Gets the number of input documents.
    pub fn num_documents(&self) -> usize {
        self.outcomes.len()
    }

    /// Gets the number of eligible documents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if there is no eligible document.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gets the memory usage of fingerprints in bytes.
    pub fn memory_in_bytes(&self) -> usize {
        self.joiner.memory_in_bytes()
    }

    fn radius(&self) -> Option<f64> {
        self.max_distance.map(|d| d as f64 / lsh::FINGERPRINT_BITS as f64)
    }

    fn accepts(&self, i: usize, j: usize) -> bool {
        self.pairing
            .accepts(self.entries[i].host.as_deref(), self.entries[j].host.as_deref())
    }

    fn to_pairs(&self, joined: Vec<Joined>) -> Vec<DocumentPair> {
        joined
            .into_iter()
            .map(|(i, j, dist)| {
                DocumentPair::new(
                    self.entries[i].url.clone(),
                    self.entries[j].url.clone(),
                    dist as u32,
                )
            })
            .collect()
    }
}

fn check_unique_urls(documents: &[DocumentRecord]) -> Result<()> {
    let mut seen = HashSet::with_capacity(documents.len());
    for doc in documents {
        if !seen.insert(doc.url.as_str()) {
            return Err(FindDupsiteError::input(format!(
                "Input URLs must be unique, but {} appears twice.",
                doc.url
            )));
        }
    }
    Ok(())
}
