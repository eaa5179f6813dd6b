//! Tables of documents and pairs, ready for export.
use serde::Serialize;

use crate::compare::DocumentPair;
use crate::document::DocumentRecord;
use crate::errors::{FindDupsiteError, Result};
use crate::fingerprint::Exclusion;

/// Whether a document could be fingerprinted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Fingerprinted and compared.
    Ok,
    /// No text was extracted.
    ExtractionFailure,
    /// The extracted text has no token.
    NoContent,
}

impl From<Exclusion> for DocumentStatus {
    fn from(e: Exclusion) -> Self {
        match e {
            Exclusion::ExtractionFailure => Self::ExtractionFailure,
            Exclusion::NoContent => Self::NoContent,
        }
    }
}

/// One row per input document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DocumentRow {
    /// Host, or empty if unknown.
    pub host: String,
    /// Source URL.
    pub url: String,
    /// Extracted text, or empty if extraction failed.
    pub text: String,
    /// Whether the document was compared.
    pub status: DocumentStatus,
    /// Fingerprint in 16 hexadecimal digits, if any.
    pub fingerprint: Option<String>,
}

impl DocumentRow {
    /// Names of the serialized fields, in order.
    pub const COLUMNS: [&'static str; 5] = ["host", "url", "text", "status", "fingerprint"];
}

/// Counts of a report, for logging.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// Number of input documents.
    pub num_documents: usize,
    /// Number of documents with a fingerprint.
    pub num_eligible: usize,
    /// Number of extraction failures.
    pub num_extraction_failures: usize,
    /// Number of documents without tokens.
    pub num_no_content: usize,
    /// Number of reported pairs.
    pub num_pairs: usize,
}

/// The two output tables: documents in the input order and pairs in the comparison order.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    /// Per-document rows.
    pub documents: Vec<DocumentRow>,
    /// Per-pair rows.
    pub pairs: Vec<DocumentPair>,
}

impl Report {
    /// Assembles the tables without reordering or filtering any row.
    ///
    /// # Errors
    ///
    /// An error is returned if `documents` and `outcomes` differ in length.
    pub fn build(
        documents: &[DocumentRecord],
        outcomes: &[Result<u64, Exclusion>],
        pairs: Vec<DocumentPair>,
    ) -> Result<Self> {
        if documents.len() != outcomes.len() {
            return Err(FindDupsiteError::input(format!(
                "Got {} documents but {} fingerprints.",
                documents.len(),
                outcomes.len()
            )));
        }
        let documents = documents
            .iter()
            .zip(outcomes.iter())
            .map(|(doc, outcome)| DocumentRow {
                host: doc.host().unwrap_or_default().to_string(),
                url: doc.url.clone(),
                text: doc.text().unwrap_or_default().to_string(),
                status: outcome.map_or_else(DocumentStatus::from, |_| DocumentStatus::Ok),
                fingerprint: outcome.ok().map(|fp| format!("{fp:016x}")),
            })
            .collect();
        Ok(Self { documents, pairs })
    }

    /// Counts the rows.
    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            num_documents: self.documents.len(),
            num_pairs: self.pairs.len(),
            ..Summary::default()
        };
        for row in &self.documents {
            match row.status {
                DocumentStatus::Ok => summary.num_eligible += 1,
                DocumentStatus::ExtractionFailure => summary.num_extraction_failures += 1,
                DocumentStatus::NoContent => summary.num_no_content += 1,
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::compare::PairingMode;
    use crate::searcher::DupSearcher;

    fn example_documents() -> Vec<DocumentRecord> {
        vec![
            DocumentRecord::new("https://a.com/x", Some("the quick brown fox".to_string())),
            DocumentRecord::new("https://b.com/y", None),
            DocumentRecord::new("https://c.com/z", Some(" ".to_string())),
            DocumentRecord::new("bad url", Some("the quick brown fox".to_string())),
        ]
    }

    #[test]
    fn test_document_rows() {
        let documents = example_documents();
        let searcher = DupSearcher::new(None)
            .build_fingerprints(&documents)
            .unwrap();
        let pairs = searcher.search_pairs().unwrap();
        let report = searcher.report(&documents, pairs).unwrap();

        let hosts: Vec<_> = report.documents.iter().map(|r| r.host.as_str()).collect();
        assert_eq!(hosts, vec!["a.com", "b.com", "c.com", ""]);
        let statuses: Vec<_> = report.documents.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![
                DocumentStatus::Ok,
                DocumentStatus::ExtractionFailure,
                DocumentStatus::NoContent,
                DocumentStatus::Ok,
            ]
        );
        assert_eq!(report.documents[1].text, "");
        assert_eq!(report.documents[1].fingerprint, None);
        assert_eq!(report.documents[2].text, " ");

        let fp = report.documents[0].fingerprint.as_ref().unwrap();
        assert_eq!(fp.len(), 16);
        assert_eq!(report.documents[3].fingerprint.as_ref(), Some(fp));
    }

    #[test]
    fn test_pair_rows() {
        let documents = example_documents();
        let searcher = DupSearcher::new(None)
            .pairing(PairingMode::CrossHostOnly)
            .build_fingerprints(&documents)
            .unwrap();
        let pairs = searcher.search_pairs().unwrap();
        let report = searcher.report(&documents, pairs.clone()).unwrap();
        assert_eq!(report.pairs, pairs);
        assert_eq!(report.pairs.len(), 1);
        assert_eq!(report.pairs[0].source, "https://a.com/x");
        assert_eq!(report.pairs[0].target, "bad url");
        assert_eq!(report.pairs[0].duplication_rate, 100.);
    }

    #[test]
    fn test_summary() {
        let documents = example_documents();
        let searcher = DupSearcher::new(None)
            .build_fingerprints(&documents)
            .unwrap();
        let pairs = searcher.search_pairs().unwrap();
        let summary = searcher.report(&documents, pairs).unwrap().summary();
        assert_eq!(
            summary,
            Summary {
                num_documents: 4,
                num_eligible: 2,
                num_extraction_failures: 1,
                num_no_content: 1,
                num_pairs: 1,
            }
        );
    }

    #[test]
    fn test_length_mismatch() {
        let documents = example_documents();
        assert!(Report::build(&documents, &[Ok(0)], vec![]).is_err());
    }

    fn assert_columns(json: &str, columns: &[&str]) {
        let positions: Vec<_> = columns
            .iter()
            .map(|c| json.find(&format!("\"{c}\":")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
        assert_eq!(json.matches("\":").count(), columns.len(), "{json}");
    }

    #[test]
    fn test_columns() {
        let documents = example_documents();
        let searcher = DupSearcher::new(None)
            .build_fingerprints(&documents)
            .unwrap();
        let report = searcher.report(&documents, vec![]).unwrap();
        let json = serde_json::to_string(&report.documents[0]).unwrap();
        assert_columns(&json, &DocumentRow::COLUMNS);

        let pair = DocumentPair {
            source: "u1".to_string(),
            target: "u2".to_string(),
            hamming_distance: 0,
            duplication_rate: 100.,
        };
        let json = serde_json::to_string(&pair).unwrap();
        assert_columns(&json, &DocumentPair::COLUMNS);
    }

    #[test]
    fn test_serialize_pair_row() {
        let pair = DocumentPair {
            source: "u1".to_string(),
            target: "u2".to_string(),
            hamming_distance: 16,
            duplication_rate: 75.,
        };
        assert_eq!(
            serde_json::to_string(&pair).unwrap(),
            r#"{"source":"u1","target":"u2","hamming_distance":16,"duplication_rate":75.0}"#
        );
    }
}
