use find_dupsite::{DocumentRecord, DupSearcher, PairingMode};

fn main() {
    let documents = vec![
        DocumentRecord::new(
            "https://jimbocho.example/welcome",
            Some("Welcome to Jimbocho, the town of books and curry!".to_string()),
        ),
        DocumentRecord::new(
            "https://jimbocho.example/about",
            Some("Welcome to Jimbocho, the town of books and curry!".to_string()),
        ),
        DocumentRecord::new(
            "https://mirror.example/jimbocho",
            Some("Welcome to Jimbocho, the town of books and curry!".to_string()),
        ),
        // Extraction failed for this page.
        DocumentRecord::new("https://broken.example/", None),
    ];

    // Creates a searcher (with seed value 42) comparing pages of different hosts only.
    let searcher = DupSearcher::new(Some(42))
        .pairing(PairingMode::CrossHostOnly)
        // Builds the fingerprints of the documents in parallel.
        .build_fingerprints_in_parallel(&documents)
        .unwrap();

    // Compares all the eligible pairs.
    let pairs = searcher.search_pairs().unwrap();
    // Pages on jimbocho.example are not compared with each other.
    assert_eq!(pairs.len(), 2);
    for pair in &pairs {
        // Identical texts are fully duplicated.
        assert_eq!(pair.hamming_distance, 0);
        assert_eq!(pair.duplication_rate, 100.);
    }

    let report = searcher.report(&documents, pairs).unwrap();
    for row in &report.documents {
        println!("{}\t{}\t{:?}", row.host, row.url, row.status);
    }
    for pair in &report.pairs {
        println!(
            "{}\t{}\t{}\t{}",
            pair.source, pair.target, pair.hamming_distance, pair.duplication_rate
        );
    }
}
