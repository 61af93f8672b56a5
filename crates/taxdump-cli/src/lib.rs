//! # taxdump-cli
//!
//! Command-line front end for the taxonomy loader.
//!
//! `taxids-to-pplacer` reads a list of taxon IDs and prints one pplacer
//! taxonomy row per ID:
//!
//! ```text
//! tax_id,parent_id,rank,tax_name,root,domain,phylum,class,order,family,genus,species
//! ```
//!
//! IDs that cannot be resolved are reported on stderr and left out.

#![warn(missing_docs)]

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use taxdump_loader::{
    flatten_all, NamesConfig, TaxdumpConfig, TaxonomyStore, DEFAULT_TAXONOMY_DIR, PPLACER_HEADER,
    TAXONOMY_DIR_ENV,
};
use taxdump_types::TaxId;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "taxids-to-pplacer")]
#[command(version)]
#[command(about = "Convert a list of NCBI taxonomy IDs to pplacer taxonomy rows")]
pub struct Cli {
    /// File of taxon IDs, one per line ('#' lines and blank lines are ignored)
    #[arg(short = 'f', long = "file")]
    pub file: PathBuf,

    /// Directory holding nodes.dmp, names.dmp and division.dmp
    #[arg(
        short = 'd',
        long = "data-dir",
        env = TAXONOMY_DIR_ENV,
        default_value = DEFAULT_TAXONOMY_DIR
    )]
    pub data_dir: PathBuf,

    /// Print the pplacer header row first
    #[arg(long)]
    pub header: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Outcome of a conversion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Rows written.
    pub written: usize,
    /// IDs that could not be resolved.
    pub skipped: usize,
}

/// Reads taxon IDs from `reader`.
///
/// Lines are trimmed; blank lines and lines starting with `#` are ignored.
/// Repeated IDs are kept once, at their first position.
pub fn parse_tax_ids<R: BufRead>(reader: R) -> io::Result<Vec<TaxId>> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let id = line.trim();
        if id.is_empty() || id.starts_with('#') {
            continue;
        }
        if seen.insert(id.to_string()) {
            ids.push(id.to_string());
        }
    }
    Ok(ids)
}

/// Reads taxon IDs from a file. See [`parse_tax_ids`].
pub fn read_tax_ids<P: AsRef<Path>>(path: P) -> io::Result<Vec<TaxId>> {
    parse_tax_ids(BufReader::new(File::open(path)?))
}

/// Loads the taxonomy and writes one CSV row per resolvable ID to `out`.
///
/// Each unresolvable ID gets one line on `diagnostics`, whatever the log
/// filter.
///
/// # Errors
/// Fails if the ID file cannot be read, the taxonomy cannot be loaded, or
/// either writer fails. Unresolvable IDs are not errors.
pub fn run<W: Write, E: Write>(cli: &Cli, out: W, mut diagnostics: E) -> Result<RunSummary> {
    let tax_ids = read_tax_ids(&cli.file)
        .with_context(|| format!("Failed to read taxon IDs from {}", cli.file.display()))?;
    tracing::debug!(count = tax_ids.len(), "read taxon IDs");

    tracing::info!("Loading taxonomy data from {}...", cli.data_dir.display());
    let config = TaxdumpConfig {
        names: NamesConfig::scientific_only(),
        ..TaxdumpConfig::new(&cli.data_dir)
    };
    let store = TaxonomyStore::load(&config)
        .with_context(|| format!("Failed to load taxonomy from {}", cli.data_dir.display()))?;
    tracing::info!("Done.");

    let mut writer = csv::WriterBuilder::new().from_writer(out);
    if cli.header {
        writer.write_record(PPLACER_HEADER)?;
    }

    let mut summary = RunSummary::default();
    for result in flatten_all(&store, &tax_ids) {
        match result {
            Ok(record) => {
                writer.write_record(record.fields())?;
                summary.written += 1;
            }
            Err(e) => {
                writeln!(diagnostics, "{e}")?;
                tracing::debug!(tax_id = e.tax_id(), error = ?e, "skipping taxon");
                summary.skipped += 1;
            }
        }
    }
    writer.flush()?;

    Ok(summary)
}
