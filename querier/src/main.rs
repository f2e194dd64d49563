use anyhow::Result;
use clap::Parser;
use querier::{OutputFormat, Querier};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "querier")]
#[command(about = "Answer boolean queries from stdin against an index file")]
struct Args {
    /// Page directory produced by the crawler
    #[arg(long)]
    pages: PathBuf,
    /// Index file produced by the indexer
    #[arg(long)]
    index: PathBuf,
    /// Print one JSON object per query instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    fmt().with_writer(io::stderr).with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let format = if args.json { OutputFormat::Json } else { OutputFormat::Text };
    let querier = Querier::open(&args.pages, &args.index, format)?;

    let stdin = io::stdin();
    let prompt = stdin.is_terminal();
    let mut out = io::stdout().lock();
    querier.run(stdin.lock(), &mut out, prompt)?;
    Ok(())
}
