mod common;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use find_dupsite::{DocumentPair, DocumentRow, DupSearcher, PairingMode, Report};
use serde::Serialize;

#[derive(Parser, Debug)]
#[clap(
    name = "find-dupsite-compare",
    about = "A program to find near-duplicate pages across hosts with 64-bit simhash."
)]
struct Args {
    /// File path to extracted documents in JSON Lines,
    /// one {"host": ..., "url": ..., "text": ...} object per line.
    /// A missing or null text means that extraction failed.
    /// A missing host is derived from the URL.
    #[clap(short = 'i', long)]
    document_path: PathBuf,

    /// Pairing mode.
    /// "cross-host" compares only pages of different hosts.
    /// "all" compares every two pages.
    #[clap(short = 'm', long, default_value = "cross-host")]
    mode: PairingMode,

    /// Reports only pairs within this Hamming distance in [0,64].
    /// If None, all the compared pairs are reported.
    #[clap(short = 'r', long)]
    max_distance: Option<u32>,

    /// Seed value for token hashes.
    #[clap(short = 's', long)]
    seed: Option<u64>,

    /// Disables parallel computation.
    #[clap(short = 'p', long)]
    disable_parallel: bool,

    /// Output CSV of documents.
    #[clap(long, default_value = "documents.csv")]
    documents_out: PathBuf,

    /// Output CSV of compared pairs.
    #[clap(long, default_value = "pairs.csv")]
    pairs_out: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let document_path = args.document_path;
    let mode = args.mode;
    let max_distance = args.max_distance;
    let seed = args.seed;
    let disable_parallel = args.disable_parallel;

    let documents = common::load_documents(&document_path)?;
    log::info!("#documents = {}", documents.len());

    let mut searcher = DupSearcher::new(seed)
        .pairing(mode)
        .max_distance(max_distance)?
        .shows_progress(true);

    {
        log::info!("Converting documents into fingerprints...");
        let start = Instant::now();
        searcher = if disable_parallel {
            searcher.build_fingerprints(&documents)?
        } else {
            searcher.build_fingerprints_in_parallel(&documents)?
        };
        log::info!(
            "Produced {} fingerprints in {} sec, consuming {} KiB",
            searcher.len(),
            start.elapsed().as_secs_f64(),
            searcher.memory_in_bytes() as f64 / 1024.
        );
    }

    log::info!("Comparing pairs in {} mode...", searcher.pairing_mode());
    let start = Instant::now();
    let pairs = if disable_parallel {
        searcher.search_pairs()?
    } else {
        searcher.search_pairs_in_parallel()?
    };
    log::info!("Done in {} sec", start.elapsed().as_secs_f64());

    let report = searcher.report(&documents, pairs)?;
    let summary = report.summary();
    log::info!(
        "#eligible = {}, #extraction_failures = {}, #no_content = {}, #pairs = {}",
        summary.num_eligible,
        summary.num_extraction_failures,
        summary.num_no_content,
        summary.num_pairs
    );

    write_report(&report, &args.documents_out, &args.pairs_out)
}

fn write_report(report: &Report, documents_out: &Path, pairs_out: &Path) -> Result<()> {
    write_csv(&DocumentRow::COLUMNS, &report.documents, documents_out)?;
    log::info!("Wrote {}", documents_out.display());
    write_csv(&DocumentPair::COLUMNS, &report.pairs, pairs_out)?;
    log::info!("Wrote {}", pairs_out.display());
    Ok(())
}

/// Writes the header even if there is no row.
fn write_csv<T>(header: &[&str], rows: &[T], path: &Path) -> Result<()>
where
    T: Serialize,
{
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    wtr.write_record(header)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
