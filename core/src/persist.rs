//! Text persistence for [`Index`].
//!
//! One line per term: `term doc1 count1 doc2 count2 ...`. Terms are written
//! in ascending order and pairs in ascending doc id so two saves of the same
//! index are byte-identical.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{Result, TseError};
use crate::{DocId, Index};

pub fn write_index<W: Write>(index: &Index, out: &mut W) -> Result<()> {
    let mut terms: Vec<_> = index.iter().collect();
    terms.sort_unstable_by(|a, b| a.0.cmp(b.0));
    for (term, set) in terms {
        let mut line = String::from(term);
        for (doc_id, count) in set.sorted() {
            line.push_str(&format!(" {doc_id} {count}"));
        }
        line.push('\n');
        out.write_all(line.as_bytes())?;
    }
    Ok(())
}

pub fn save_index<P: AsRef<Path>>(index: &Index, path: P) -> Result<()> {
    let mut out = BufWriter::new(File::create(path.as_ref())?);
    write_index(index, &mut out)?;
    out.flush()?;
    tracing::debug!(path = %path.as_ref().display(), terms = index.num_terms(), "index saved");
    Ok(())
}

/// Fold every entry read from `reader` into `index`, overwriting counts.
pub fn read_index_into<R: BufRead>(index: &mut Index, reader: R) -> Result<()> {
    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = n + 1;
        let mut tokens = line.split_whitespace();
        let Some(term) = tokens.next() else { continue };
        let numbers: Vec<&str> = tokens.collect();
        if numbers.len() % 2 != 0 {
            return Err(TseError::malformed_index(line_no, "odd number of doc/count tokens"));
        }
        for pair in numbers.chunks_exact(2) {
            let doc_id: DocId = parse_positive(pair[0], line_no, "doc id")?;
            let count: u32 = parse_positive(pair[1], line_no, "count")?;
            index.set_count(term, doc_id, count)?;
        }
    }
    Ok(())
}

fn parse_positive(token: &str, line_no: usize, what: &str) -> Result<u32> {
    match token.parse::<u32>() {
        Ok(0) => Err(TseError::malformed_index(line_no, format!("{what} must be positive"))),
        Ok(v) => Ok(v),
        Err(_) => Err(TseError::malformed_index(line_no, format!("{what} `{token}` is not an integer"))),
    }
}

pub fn merge_index<P: AsRef<Path>>(index: &mut Index, path: P) -> Result<()> {
    let f = File::open(path.as_ref())?;
    read_index_into(index, BufReader::new(f))
}

pub fn load_index<P: AsRef<Path>>(path: P) -> Result<Index> {
    let mut index = Index::new();
    merge_index(&mut index, path)?;
    Ok(index)
}

impl Index {
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> { save_index(self, path) }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Index> { load_index(path) }

    pub fn merge_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> { merge_index(self, path) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample() -> Index {
        let mut idx = Index::new();
        for (term, doc) in [("dog", 3), ("cat", 2), ("cat", 1), ("cat", 1), ("dog", 2)] {
            idx.add_occurrence(term, doc).unwrap();
        }
        idx
    }

    #[test]
    fn writes_sorted_lines() {
        let mut buf = Vec::new();
        write_index(&sample(), &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "cat 1 2 2 1\ndog 2 1 3 1\n");
    }

    #[test]
    fn reads_back_what_it_wrote() {
        let mut buf = Vec::new();
        write_index(&sample(), &mut buf).unwrap();
        let mut idx = Index::new();
        read_index_into(&mut idx, Cursor::new(buf)).unwrap();
        assert_eq!(idx, sample());
    }

    #[test]
    fn read_values_overwrite_existing_counts() {
        let mut idx = sample();
        read_index_into(&mut idx, Cursor::new("cat 1 9\nowl 4 1\n")).unwrap();
        assert_eq!(idx.find("cat").unwrap().get(1), 9);
        assert_eq!(idx.find("cat").unwrap().get(2), 1);
        assert_eq!(idx.find("owl").unwrap().get(4), 1);
    }

    #[test]
    fn skips_blank_lines_and_accepts_bare_term() {
        let mut idx = Index::new();
        read_index_into(&mut idx, Cursor::new("\n  \ncat 1 1\nlonely\n")).unwrap();
        assert_eq!(idx.num_terms(), 1);
        assert!(idx.find("lonely").is_none());
    }

    #[test]
    fn rejects_odd_pairs_with_line_number() {
        let mut idx = Index::new();
        let err = read_index_into(&mut idx, Cursor::new("cat 1 1\ndog 2\n")).unwrap_err();
        assert!(matches!(err, TseError::MalformedIndex { line: 2, .. }));
    }

    #[test]
    fn rejects_zero_and_garbage() {
        for text in ["cat 0 1\n", "cat 1 0\n", "cat x 1\n", "cat 1 -3\n"] {
            let mut idx = Index::new();
            let err = read_index_into(&mut idx, Cursor::new(text)).unwrap_err();
            assert!(matches!(err, TseError::MalformedIndex { line: 1, .. }), "{text:?}");
        }
    }
}
