use std::collections::HashMap;

use crate::error::{Result, TseError};
use crate::DocId;

/// Occurrence counts keyed by document id.
///
/// Every stored count is at least 1, so a lookup of 0 always means "absent".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingSet {
    counts: HashMap<DocId, u32>,
}

impl PostingSet {
    pub fn new() -> Self { Self::default() }

    /// Bump the count for `doc_id`, creating it at 1. Returns the new count.
    pub fn increment(&mut self, doc_id: DocId) -> u32 {
        let count = self.counts.entry(doc_id).or_insert(0);
        *count += 1;
        *count
    }

    /// Add `amount` to the count for `doc_id`. Adding zero stores nothing.
    pub fn add(&mut self, doc_id: DocId, amount: u32) -> u32 {
        if amount == 0 {
            return self.get(doc_id);
        }
        let count = self.counts.entry(doc_id).or_insert(0);
        *count = count.saturating_add(amount);
        *count
    }

    /// Overwrite (or create) the count for `doc_id`.
    pub fn set(&mut self, doc_id: DocId, count: u32) -> Result<()> {
        if doc_id == 0 || count == 0 {
            return Err(TseError::InvalidPosting { doc_id, count });
        }
        self.counts.insert(doc_id, count);
        Ok(())
    }

    /// Count for `doc_id`, or 0 when absent.
    pub fn get(&self, doc_id: DocId) -> u32 {
        self.counts.get(&doc_id).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool { self.counts.is_empty() }

    pub fn len(&self) -> usize { self.counts.len() }

    /// Visit every (doc_id, count) pair once, in no particular order.
    pub fn for_each<F: FnMut(DocId, u32)>(&self, mut visit: F) {
        for (&doc_id, &count) in &self.counts {
            visit(doc_id, count);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (DocId, u32)> + '_ {
        self.counts.iter().map(|(&d, &c)| (d, c))
    }

    /// Pairs sorted by ascending doc id.
    pub fn sorted(&self) -> Vec<(DocId, u32)> {
        let mut pairs: Vec<(DocId, u32)> = self.iter().collect();
        pairs.sort_unstable_by_key(|&(doc_id, _)| doc_id);
        pairs
    }
}

impl IntoIterator for PostingSet {
    type Item = (DocId, u32);
    type IntoIter = std::collections::hash_map::IntoIter<DocId, u32>;

    fn into_iter(self) -> Self::IntoIter { self.counts.into_iter() }
}

impl FromIterator<(DocId, u32)> for PostingSet {
    /// Zero counts are dropped so the positive-count invariant holds.
    fn from_iter<I: IntoIterator<Item = (DocId, u32)>>(iter: I) -> Self {
        let counts = iter.into_iter().filter(|&(_, count)| count > 0).collect();
        Self { counts }
    }
}
