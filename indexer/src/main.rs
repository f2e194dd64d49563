use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};
use tse_core::{Index, IndexBuilder, PageDir};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build an inverted index from a crawler page directory", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index every page of a crawler directory and write the index file
    Build {
        /// Page directory produced by the crawler
        #[arg(long)]
        pages: PathBuf,
        /// Index file to create or overwrite
        #[arg(long)]
        output: PathBuf,
    },
    /// Load an index file and write it back out, for round-trip checks
    Rewrite {
        /// Existing index file
        #[arg(long)]
        input: PathBuf,
        /// Index file to create or overwrite
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    fmt().with_writer(std::io::stderr).with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { pages, output } => build_index(&pages, &output),
        Commands::Rewrite { input, output } => rewrite_index(&input, &output),
    }
}

/// Fail before doing any work if `path` cannot be written. An existing file
/// keeps its contents until the new index is ready.
fn check_writable(path: &Path) -> Result<()> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .with_context(|| format!("{} is not a writable file path", path.display()))?;
    Ok(())
}

fn build_index(pages: &Path, output: &Path) -> Result<()> {
    let dir = PageDir::new(pages);
    if !dir.validate() {
        bail!("{} is not a directory produced by the crawler", pages.display());
    }
    check_writable(output)?;

    let index = IndexBuilder::new()
        .build(&dir)
        .with_context(|| format!("failed to build index from {}", pages.display()))?;
    save(&index, output)
}

fn rewrite_index(input: &Path, output: &Path) -> Result<()> {
    let index = Index::load(input).with_context(|| format!("failed to read index {}", input.display()))?;
    tracing::info!(terms = index.num_terms(), input = %input.display(), "index loaded");
    save(&index, output)
}

fn save(index: &Index, output: &Path) -> Result<()> {
    if let Err(e) = index.save(output) {
        tracing::error!(output = %output.display(), error = %e, "failed to write index");
        return Err(e).context("failed to write index");
    }
    tracing::info!(output = %output.display(), terms = index.num_terms(), "index written");
    Ok(())
}
