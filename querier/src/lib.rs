use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tse_core::query::score;
use tse_core::{rank, Index, PageDir, Query, QueryError, RankedDoc, TseError};

const SEPARATOR: &str = "-----------------------------------------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub doc_id: u32,
    pub score: u32,
    pub url: String,
}

impl From<RankedDoc> for SearchHit {
    fn from(r: RankedDoc) -> Self { Self { doc_id: r.doc_id, score: r.score, url: r.url } }
}

/// Outcome of one query line.
#[derive(Debug)]
pub enum Answer {
    Invalid(QueryError),
    NoMatch(Query),
    Hits(Query, Vec<RankedDoc>),
    /// The query matched but a result could not be resolved.
    Failed(Query, TseError),
}

pub struct Querier {
    index: Index,
    pages: PageDir,
    format: OutputFormat,
}

impl Querier {
    pub fn new(index: Index, pages: PageDir, format: OutputFormat) -> Self {
        Self { index, pages, format }
    }

    /// Validate the page directory and load the index file.
    pub fn open(pages: &Path, index_file: &Path, format: OutputFormat) -> Result<Self> {
        let dir = PageDir::new(pages);
        if !dir.validate() {
            bail!("{} is not a directory produced by the crawler", pages.display());
        }
        let index = Index::load(index_file)
            .with_context(|| format!("failed to read index {}", index_file.display()))?;
        tracing::info!(terms = index.num_terms(), index = %index_file.display(), "index loaded");
        Ok(Self::new(index, dir, format))
    }

    pub fn answer(&self, line: &str) -> Answer {
        let query = match Query::parse(line) {
            Ok(q) => q,
            Err(e) => return Answer::Invalid(e),
        };
        let Some(scores) = score(&self.index, &query) else {
            return Answer::NoMatch(query);
        };
        tracing::debug!(query = %query, matches = scores.len(), "scored query");
        match rank(scores, &self.pages) {
            Ok(ranked) => Answer::Hits(query, ranked),
            Err(e) => Answer::Failed(query, e),
        }
    }

    /// Answer one query per input line until end of input.
    pub fn run<R: BufRead, W: Write>(&self, input: R, out: &mut W, prompt: bool) -> io::Result<()> {
        if prompt {
            write!(out, "Query? ")?;
            out.flush()?;
        }
        for line in input.lines() {
            let line = line?;
            let answer = self.answer(&line);
            match self.format {
                OutputFormat::Text => write_text(out, &answer)?,
                OutputFormat::Json => write_json(out, &line, answer)?,
            }
            if prompt {
                write!(out, "Query? ")?;
            }
            out.flush()?;
        }
        Ok(())
    }
}

fn write_text<W: Write>(out: &mut W, answer: &Answer) -> io::Result<()> {
    match answer {
        Answer::Invalid(e) => writeln!(out, "Invalid query: {e}")?,
        Answer::NoMatch(q) => {
            writeln!(out, "Query: {q}")?;
            writeln!(out, "No documents match.")?;
        }
        Answer::Hits(q, ranked) => {
            writeln!(out, "Query: {q}")?;
            writeln!(out, "Matches {} documents (ranked):", ranked.len())?;
            for r in ranked {
                writeln!(out, "{r}")?;
            }
        }
        Answer::Failed(q, e) => {
            writeln!(out, "Query: {q}")?;
            writeln!(out, "Error: {e}")?;
        }
    }
    writeln!(out, "{SEPARATOR}")
}

fn write_json<W: Write>(out: &mut W, line: &str, answer: Answer) -> io::Result<()> {
    let resp = match answer {
        Answer::Invalid(e) => SearchResponse {
            query: line.trim().to_string(),
            total_hits: 0,
            results: vec![],
            error: Some(format!("invalid query: {e}")),
        },
        Answer::NoMatch(q) => SearchResponse { query: q.to_string(), total_hits: 0, results: vec![], error: None },
        Answer::Hits(q, ranked) => SearchResponse {
            query: q.to_string(),
            total_hits: ranked.len(),
            results: ranked.into_iter().map(SearchHit::from).collect(),
            error: None,
        },
        Answer::Failed(q, e) => SearchResponse {
            query: q.to_string(),
            total_hits: 0,
            results: vec![],
            error: Some(e.to_string()),
        },
    };
    serde_json::to_writer(&mut *out, &resp)?;
    writeln!(out)
}
