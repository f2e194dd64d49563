use crate::error::Result;
use crate::pagedir::DocumentStore;
use crate::tokenizer::{terms, MIN_WORD_LEN};
use crate::{DocId, Index};

/// Folds the documents of a store into an [`Index`].
///
/// Documents are read one at a time starting at id 1; the first missing id
/// ends the scan.
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    pub min_word_len: usize,
}

impl Default for IndexBuilder {
    fn default() -> Self { Self { min_word_len: MIN_WORD_LEN } }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub documents: u32,
    pub words: u64,
    pub skipped: u64,
}

impl IndexBuilder {
    pub fn new() -> Self { Self::default() }

    pub fn build<S: DocumentStore>(&self, store: &S) -> Result<Index> {
        let mut index = Index::new();
        let stats = self.build_into(store, &mut index)?;
        tracing::info!(
            documents = stats.documents,
            words = stats.words,
            skipped = stats.skipped,
            terms = index.num_terms(),
            "index build complete"
        );
        Ok(index)
    }

    pub fn build_into<S: DocumentStore>(&self, store: &S, index: &mut Index) -> Result<BuildStats> {
        let mut stats = BuildStats::default();
        let mut doc_id: DocId = 1;
        while let Some(doc) = store.load_document(doc_id)? {
            let (added, skipped) = self.index_page(index, &doc.content, doc_id);
            tracing::debug!(doc_id, url = %doc.url, words = added, "indexed document");
            stats.documents += 1;
            stats.words += added;
            stats.skipped += skipped;
            doc_id += 1;
        }
        Ok(stats)
    }

    /// Add every term of `content` under `doc_id`. A word the index refuses
    /// is logged and skipped. Returns (added, skipped).
    pub fn index_page(&self, index: &mut Index, content: &str, doc_id: DocId) -> (u64, u64) {
        let mut added = 0;
        let mut skipped = 0;
        for term in terms(content, self.min_word_len) {
            match index.add_occurrence(&term, doc_id) {
                Ok(_) => added += 1,
                Err(e) => {
                    tracing::warn!(doc_id, term = %term, error = %e, "failed to add word to index");
                    skipped += 1;
                }
            }
        }
        (added, skipped)
    }
}
