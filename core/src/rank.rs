use std::cmp::Reverse;
use std::fmt;

use crate::error::{Result, TseError};
use crate::pagedir::DocumentStore;
use crate::{DocId, PostingSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedDoc {
    pub score: u32,
    pub doc_id: DocId,
    pub url: String,
}

impl fmt::Display for RankedDoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "score {} doc {}: {}", self.score, self.doc_id, self.url)
    }
}

/// Order scored documents by descending score, ties by ascending doc id,
/// and resolve each url through `store`.
pub fn rank<S: DocumentStore>(scores: PostingSet, store: &S) -> Result<Vec<RankedDoc>> {
    let mut scored: Vec<(DocId, u32)> = scores.into_iter().collect();
    scored.sort_unstable_by_key(|&(doc_id, score)| (Reverse(score), doc_id));

    let mut out = Vec::with_capacity(scored.len());
    for (doc_id, score) in scored {
        let doc = store.load_document(doc_id)?.ok_or(TseError::MissingDocument(doc_id))?;
        out.push(RankedDoc { score, doc_id, url: doc.url });
    }
    Ok(out)
}
