mod common;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use find_dupsite::DocumentPair;
use hashbrown::HashMap;

#[derive(Parser, Debug)]
#[clap(
    name = "find-dupsite-dump",
    about = "A program to dump the texts of compared pairs."
)]
struct Args {
    /// File path to extracted documents in JSON Lines.
    #[clap(short = 'i', long)]
    document_path: PathBuf,

    /// File path to a pairs CSV produced by compare.
    #[clap(short = 's', long)]
    simpair_path: PathBuf,

    /// Dumps only pairs with at least this duplication rate.
    #[clap(short = 't', long, default_value = "0")]
    min_rate: f64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let document_path = args.document_path;
    let simpair_path = args.simpair_path;
    let min_rate = args.min_rate;

    let documents = common::load_documents(&document_path)?;
    let texts: HashMap<_, _> = documents
        .iter()
        .map(|doc| (doc.url.as_str(), doc.text().unwrap_or_default()))
        .collect();

    let mut rdr = csv::Reader::from_path(&simpair_path)
        .with_context(|| format!("failed to open {}", simpair_path.display()))?;
    for row in rdr.deserialize() {
        let pair: DocumentPair = row?;
        if pair.duplication_rate < min_rate {
            continue;
        }
        let source = texts.get(pair.source.as_str());
        let target = texts.get(pair.target.as_str());
        let (source, target) = match (source, target) {
            (Some(source), Some(target)) => (source, target),
            _ => {
                log::warn!("Unknown pair {} - {}", pair.source, pair.target);
                continue;
            }
        };
        println!(
            "[source={},target={},dist={},rate={}]",
            pair.source, pair.target, pair.hamming_distance, pair.duplication_rate
        );
        println!("{source}");
        println!("{target}");
    }

    Ok(())
}
