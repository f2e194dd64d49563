use std::collections::HashMap;

use crate::error::{Result, TseError};
use crate::posting::PostingSet;
use crate::DocId;

/// Inverted index: term -> per-document occurrence counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    postings: HashMap<String, PostingSet>,
}

impl Index {
    pub fn new() -> Self { Self::default() }

    /// Record one occurrence of `term` in `doc_id`. Returns the new count.
    pub fn add_occurrence(&mut self, term: &str, doc_id: DocId) -> Result<u32> {
        check_term(term)?;
        if let Some(set) = self.postings.get_mut(term) {
            return Ok(set.increment(doc_id));
        }
        let mut set = PostingSet::new();
        let count = set.increment(doc_id);
        self.postings.insert(term.to_string(), set);
        Ok(count)
    }

    /// Absolute write used when reading an index file; read values win.
    pub fn set_count(&mut self, term: &str, doc_id: DocId, count: u32) -> Result<()> {
        check_term(term)?;
        match self.postings.get_mut(term) {
            Some(set) => set.set(doc_id, count),
            None => {
                let mut set = PostingSet::new();
                set.set(doc_id, count)?;
                self.postings.insert(term.to_string(), set);
                Ok(())
            }
        }
    }

    pub fn find(&self, term: &str) -> Option<&PostingSet> {
        self.postings.get(term)
    }

    pub fn for_each<F: FnMut(&str, &PostingSet)>(&self, mut visit: F) {
        for (term, set) in &self.postings {
            visit(term, set);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PostingSet)> + '_ {
        self.postings.iter().map(|(t, s)| (t.as_str(), s))
    }

    pub fn num_terms(&self) -> usize { self.postings.len() }

    pub fn is_empty(&self) -> bool { self.postings.is_empty() }
}

fn check_term(term: &str) -> Result<()> {
    if term.is_empty() {
        return Err(TseError::EmptyTerm);
    }
    if term.chars().any(char::is_whitespace) {
        return Err(TseError::InvalidTerm(term.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_occurrence_creates_and_increments() {
        let mut idx = Index::new();
        assert_eq!(idx.add_occurrence("cat", 1).unwrap(), 1);
        assert_eq!(idx.add_occurrence("cat", 1).unwrap(), 2);
        assert_eq!(idx.add_occurrence("cat", 3).unwrap(), 1);
        let cat = idx.find("cat").unwrap();
        assert_eq!(cat.get(1), 2);
        assert_eq!(cat.get(3), 1);
        assert_eq!(idx.num_terms(), 1);
    }

    #[test]
    fn empty_term_is_rejected() {
        let mut idx = Index::new();
        assert!(matches!(idx.add_occurrence("", 1), Err(TseError::EmptyTerm)));
        assert!(idx.is_empty());
    }

    #[test]
    fn whitespace_in_term_is_rejected() {
        let mut idx = Index::new();
        assert!(matches!(idx.add_occurrence("two words", 1), Err(TseError::InvalidTerm(_))));
        assert!(matches!(idx.set_count("tab\tbed", 1, 2), Err(TseError::InvalidTerm(_))));
        assert!(idx.is_empty());
    }

    #[test]
    fn find_unknown_term_is_none() {
        let idx = Index::new();
        assert!(idx.find("missing").is_none());
    }

    #[test]
    fn set_count_overwrites_existing_entry() {
        let mut idx = Index::new();
        idx.add_occurrence("dog", 2).unwrap();
        idx.add_occurrence("dog", 2).unwrap();
        idx.set_count("dog", 2, 7).unwrap();
        idx.set_count("eel", 5, 1).unwrap();
        assert_eq!(idx.find("dog").unwrap().get(2), 7);
        assert_eq!(idx.find("eel").unwrap().get(5), 1);
    }

    #[test]
    fn for_each_visits_every_term() {
        let mut idx = Index::new();
        for term in ["ant", "bee", "ant"] {
            idx.add_occurrence(term, 1).unwrap();
        }
        let mut seen = Vec::new();
        idx.for_each(|term, set| seen.push((term.to_string(), set.get(1))));
        seen.sort();
        assert_eq!(seen, vec![("ant".to_string(), 2), ("bee".to_string(), 1)]);
    }

    #[test]
    fn failed_set_count_leaves_no_empty_term() {
        let mut idx = Index::new();
        assert!(idx.set_count("fox", 0, 3).is_err());
        assert!(idx.find("fox").is_none());
    }
}
