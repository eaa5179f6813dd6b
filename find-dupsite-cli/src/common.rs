use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use find_dupsite::DocumentRecord;

/// Loads documents from JSON Lines, skipping blank lines.
/// Hosts missing in the input are derived from URLs.
pub fn load_documents<P>(path: P) -> Result<Vec<DocumentRecord>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut documents = vec![];
    for (i, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let doc: DocumentRecord = serde_json::from_str(&line)
            .with_context(|| format!("invalid document at {}:{}", path.display(), i + 1))?;
        documents.push(doc.with_derived_host());
    }
    Ok(documents)
}
