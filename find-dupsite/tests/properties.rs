//! Property-based tests of fingerprints and pairwise comparison.
//!
//! These tests verify invariants that should hold regardless of input:
//! - Fingerprints are deterministic
//! - Distances are symmetric and bounded by the fingerprint width
//! - Duplication rates follow the distance exactly
//! - Pairs are unique, never self-paired, and follow the pairing mode

use find_dupsite::{
    compare_all, compute_fingerprint, duplication_rate, DocumentRecord, DupSearcher, PairingMode,
};
use hashbrown::HashSet;
use proptest::prelude::*;

fn hamdist(x: u64, y: u64) -> u32 {
    (x ^ y).count_ones()
}

prop_compose! {
    fn arb_text()(words in prop::collection::vec("[a-zA-Z,.!]{1,8}", 0..30)) -> String {
        words.join(" ")
    }
}

prop_compose! {
    fn arb_documents(max_len: usize)(
        entries in prop::collection::vec(
            (prop::option::of(0..4usize), prop::option::of(arb_text())),
            0..max_len,
        )
    ) -> Vec<DocumentRecord> {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (host, text))| {
                let host = host.map(|h| format!("host{h}.com"));
                DocumentRecord::with_host(host, format!("u{i}"), text)
            })
            .collect()
    }
}

fn num_eligible(documents: &[DocumentRecord]) -> usize {
    documents
        .iter()
        .filter(|d| compute_fingerprint(d.text()).1)
        .count()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn fingerprint_is_deterministic(text in arb_text()) {
        prop_assert_eq!(compute_fingerprint(Some(&text)), compute_fingerprint(Some(&text)));
    }

    #[test]
    fn fingerprint_present_iff_tokens(text in arb_text()) {
        let (_, present) = compute_fingerprint(Some(&text));
        prop_assert_eq!(present, text.split_whitespace().next().is_some());
    }

    #[test]
    fn distance_is_symmetric_and_bounded(a in arb_text(), b in arb_text()) {
        let (x, _) = compute_fingerprint(Some(&a));
        let (y, _) = compute_fingerprint(Some(&b));
        prop_assert_eq!(hamdist(x, y), hamdist(y, x));
        prop_assert!(hamdist(x, y) <= 64);
        prop_assert_eq!(hamdist(x, x), 0);
    }

    #[test]
    fn pairs_are_well_formed(documents in arb_documents(12)) {
        let pairs = compare_all(&documents, PairingMode::AllPairs);
        let n = num_eligible(&documents);
        // Every candidate is accepted in this mode.
        prop_assert_eq!(pairs.len(), n * n.saturating_sub(1) / 2);

        let mut seen = HashSet::new();
        for pair in &pairs {
            prop_assert_ne!(&pair.source, &pair.target);
            prop_assert!(pair.hamming_distance <= 64);
            prop_assert!((0. ..=100.).contains(&pair.duplication_rate));
            let expected = (1. - pair.hamming_distance as f64 / 64.) * 100.;
            prop_assert!((pair.duplication_rate - expected).abs() < 1e-9);
            prop_assert_eq!(pair.duplication_rate, duplication_rate(pair.hamming_distance));
            let key = if pair.source < pair.target {
                (pair.source.clone(), pair.target.clone())
            } else {
                (pair.target.clone(), pair.source.clone())
            };
            prop_assert!(seen.insert(key));
        }
    }

    #[test]
    fn pairs_follow_input_order(documents in arb_documents(12)) {
        let position = |url: &str| documents.iter().position(|d| d.url == url).unwrap();
        let pairs = compare_all(&documents, PairingMode::AllPairs);
        let indices: Vec<_> = pairs
            .iter()
            .map(|p| (position(&p.source), position(&p.target)))
            .collect();
        prop_assert!(indices.iter().all(|(i, j)| i < j));
        prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn cross_host_is_subset_of_all(documents in arb_documents(12)) {
        let all = compare_all(&documents, PairingMode::AllPairs);
        let cross = compare_all(&documents, PairingMode::CrossHostOnly);
        let host = |url: &str| {
            documents
                .iter()
                .find(|d| d.url == url)
                .and_then(|d| d.host())
                .map(str::to_string)
        };
        let expected: Vec<_> = all
            .into_iter()
            .filter(|p| match (host(&p.source), host(&p.target)) {
                (Some(x), Some(y)) => x != y,
                _ => true,
            })
            .collect();
        prop_assert_eq!(cross, expected);
    }

    #[test]
    fn parallel_matches_sequential(documents in arb_documents(16), seed in any::<u64>()) {
        let sequential = DupSearcher::new(Some(seed))
            .build_fingerprints(&documents)
            .unwrap();
        let parallel = DupSearcher::new(Some(seed))
            .build_fingerprints_in_parallel(&documents)
            .unwrap();
        prop_assert_eq!(sequential.outcomes(), parallel.outcomes());
        prop_assert_eq!(
            sequential.search_pairs().unwrap(),
            parallel.search_pairs_in_parallel().unwrap()
        );
    }
}

#[test]
fn identical_text_is_fully_duplicated() {
    let text = "Welcome to Jimbocho, the town of books and curry!";
    let documents = vec![
        DocumentRecord::new("https://a.com/1", Some(text.to_string())),
        DocumentRecord::new("https://b.com/1", Some(text.to_string())),
    ];
    let pairs = compare_all(&documents, PairingMode::CrossHostOnly);
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].hamming_distance, 0);
    assert_eq!(pairs[0].duplication_rate, 100.);
}

#[test]
fn near_duplicates_score_higher_than_unrelated() {
    let base: Vec<String> = (0..300).map(|i| format!("word{i}")).collect();
    let mut near = base.clone();
    near[..15].iter_mut().for_each(|w| w.push('x'));
    let other: Vec<String> = (0..300).map(|i| format!("other{i}")).collect();

    let documents = vec![
        DocumentRecord::new("https://a.com/", Some(base.join(" "))),
        DocumentRecord::new("https://b.com/", Some(near.join(" "))),
        DocumentRecord::new("https://c.com/", Some(other.join(" "))),
    ];
    let pairs = compare_all(&documents, PairingMode::CrossHostOnly);
    assert_eq!(pairs.len(), 3);
    // (a, b), (a, c), (b, c)
    assert!(pairs[0].duplication_rate > pairs[1].duplication_rate);
    assert!(pairs[0].duplication_rate > pairs[2].duplication_rate);
}
