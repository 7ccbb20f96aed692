//! A command line tool that splits a FASTA alignment into site-compressed
//! partitions.
//!
//! ```shell
//! cargo run --release --bin=msapart --features=binaries -- alignment.fa partitions.txt
//! ```
//!
//! For every partition in the partition file, the tool prints the model, the
//! number of alignment columns the partition covers, and the number of distinct
//! site patterns left after compression. If a list of taxa is given (one label
//! per line, for example the leaves of a tree), the alignment labels are
//! checked against it first and every mismatch is logged.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use clap_verbosity_flag::WarnLevel;
use msapart::alignment::Alignment;
use msapart::partition;
use tabled::Table;
use tabled::Tabled;
use tracing::info;
use tracing_log::AsTrace as _;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// The alignment in FASTA format (optionally gzipped).
    alignment: PathBuf,

    /// The partition file (optionally gzipped).
    partitions: PathBuf,

    /// A file of reference taxa, one label per line, that the alignment labels
    /// must match exactly.
    #[arg(short, long)]
    taxa: Option<PathBuf>,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

/// A row of the summary table.
#[derive(Tabled)]
struct Row {
    /// The partition name.
    #[tabled(rename = "partition")]
    name: String,

    /// The model name.
    model: String,

    /// The number of alignment columns covered by the partition.
    columns: usize,

    /// The number of distinct site patterns.
    patterns: usize,
}

/// Reads a set of taxa, one per non-blank line.
fn read_taxa(path: &Path) -> Result<HashSet<String>> {
    let contents = fs::read_to_string(path)?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

fn run(args: &Args) -> Result<()> {
    let alignment = Alignment::from_fasta_path(&args.alignment)
        .with_context(|| format!("reading alignment `{}`", args.alignment.display()))?;
    info!(
        "alignment: {} sequences with {} columns",
        alignment.count(),
        alignment.length()
    );

    let partitions = partition::File::from_path(&args.partitions)
        .with_context(|| format!("reading partitions `{}`", args.partitions.display()))?;
    info!("partitions: {} loaded", partitions.len());

    if let Some(path) = &args.taxa {
        let taxa = read_taxa(path)
            .with_context(|| format!("reading taxa `{}`", path.display()))?;

        if !alignment.is_consistent_with(&taxa) {
            bail!(
                "the alignment labels do not match the taxa in `{}`",
                path.display()
            );
        }

        info!("taxa: {} labels match the alignment", taxa.len());
    }

    let derived = alignment
        .partition_all(&partitions)
        .context("partitioning the alignment")?;

    let rows = partitions
        .iter()
        .zip(&derived)
        .map(|(partition, alignment)| Row {
            name: partition.name().to_string(),
            model: partition.model_name().to_string(),
            columns: alignment.total_weight(),
            patterns: alignment.length(),
        })
        .collect::<Vec<_>>();

    println!("{}", Table::new(rows));

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    match std::env::var("RUST_LOG") {
        Ok(_) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_max_level(args.verbose.log_level_filter().as_trace())
            .init(),
    };

    run(&args)
}
