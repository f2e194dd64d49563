//! Error types shared by the index, the page directory and the ranker.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::DocId;

#[derive(Error, Debug)]
pub enum TseError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A line of an index file could not be parsed.
    #[error("malformed index file at line {line}: {reason}")]
    MalformedIndex { line: usize, reason: String },

    /// A page file exists but does not have the url/depth/content layout.
    #[error("malformed document {doc_id}: {reason}")]
    MalformedDocument { doc_id: DocId, reason: String },

    #[error("invalid posting: doc {doc_id} count {count}")]
    InvalidPosting { doc_id: DocId, count: u32 },

    #[error("term must not be empty")]
    EmptyTerm,

    /// Terms are written as one whitespace-delimited token per index line.
    #[error("term `{0}` contains whitespace")]
    InvalidTerm(String),

    /// A scored document has no page in the page directory.
    #[error("document {0} not found in page directory")]
    MissingDocument(DocId),

    #[error("{} is not a directory produced by the crawler", .0.display())]
    NotAPageDirectory(PathBuf),
}

impl TseError {
    pub fn malformed_index<S: Into<String>>(line: usize, reason: S) -> Self {
        TseError::MalformedIndex { line, reason: reason.into() }
    }

    pub fn malformed_document<S: Into<String>>(doc_id: DocId, reason: S) -> Self {
        TseError::MalformedDocument { doc_id, reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, TseError>;
