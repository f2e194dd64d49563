//! Page directory written by the crawler: one file per document id plus a
//! `.crawler` marker.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, TseError};
use crate::DocId;

const MARKER: &str = ".crawler";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub url: String,
    pub depth: u32,
    pub content: String,
}

/// Where documents come from. `load_document` returning `None` means there
/// is no document with that id.
pub trait DocumentStore {
    fn load_document(&self, doc_id: DocId) -> Result<Option<Document>>;
    fn save_document(&self, doc_id: DocId, doc: &Document) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct PageDir {
    pub root: PathBuf,
}

impl PageDir {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    /// Open an existing page directory, refusing one without the marker.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let dir = Self::new(root);
        if !dir.validate() {
            return Err(TseError::NotAPageDirectory(dir.root));
        }
        Ok(dir)
    }

    fn marker(&self) -> PathBuf { self.root.join(MARKER) }
    fn page(&self, doc_id: DocId) -> PathBuf { self.root.join(doc_id.to_string()) }

    /// Create the directory if needed and drop the marker file into it.
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        File::create(self.marker())?;
        Ok(())
    }

    pub fn validate(&self) -> bool { self.marker().is_file() }

    pub fn save(&self, doc_id: DocId, doc: &Document) -> Result<()> {
        let mut f = File::create(self.page(doc_id))?;
        write!(f, "{}\n{}\n{}", doc.url, doc.depth, doc.content)?;
        f.flush()?;
        Ok(())
    }

    pub fn load(&self, doc_id: DocId) -> Result<Option<Document>> {
        if doc_id == 0 {
            return Ok(None);
        }
        // pages are not guaranteed to be UTF-8; undecodable bytes become U+FFFD
        let text = match fs::read(self.page(doc_id)) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut parts = text.splitn(3, '\n');
        let url = match parts.next() {
            Some(u) if !u.trim().is_empty() => u.trim_end_matches('\r').to_string(),
            _ => return Err(TseError::malformed_document(doc_id, "missing url line")),
        };
        let depth = parts
            .next()
            .ok_or_else(|| TseError::malformed_document(doc_id, "missing depth line"))?
            .trim()
            .parse::<u32>()
            .map_err(|_| TseError::malformed_document(doc_id, "depth is not an integer"))?;
        let content = parts.next().unwrap_or("").to_string();
        Ok(Some(Document { url, depth, content }))
    }
}

impl DocumentStore for PageDir {
    fn load_document(&self, doc_id: DocId) -> Result<Option<Document>> { self.load(doc_id) }

    fn save_document(&self, doc_id: DocId, doc: &Document) -> Result<()> { self.save(doc_id, doc) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn doc(url: &str, content: &str) -> Document {
        Document { url: url.into(), depth: 1, content: content.into() }
    }

    #[test]
    fn init_then_validate() {
        let tmp = tempdir().unwrap();
        let dir = PageDir::new(tmp.path().join("pages"));
        assert!(!dir.validate());
        assert!(PageDir::open(&dir.root).is_err());
        dir.init().unwrap();
        assert!(dir.validate());
        assert!(PageDir::open(&dir.root).is_ok());
    }

    #[test]
    fn save_load_keeps_multiline_content() {
        let tmp = tempdir().unwrap();
        let dir = PageDir::new(tmp.path());
        dir.init().unwrap();
        let d = doc("http://example.com/a.html", "<html>\n<body>hello\nworld</body>\n</html>\n");
        dir.save(1, &d).unwrap();
        assert_eq!(dir.load(1).unwrap(), Some(d));
    }

    #[test]
    fn missing_page_is_none() {
        let tmp = tempdir().unwrap();
        let dir = PageDir::new(tmp.path());
        assert_eq!(dir.load(1).unwrap(), None);
        assert_eq!(dir.load(0).unwrap(), None);
    }

    #[test]
    fn non_utf8_page_still_loads() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("1"), b"http://x/latin1\n0\ncaf\xe9 mouse".as_slice()).unwrap();
        let doc = PageDir::new(tmp.path()).load(1).unwrap().unwrap();
        assert_eq!(doc.url, "http://x/latin1");
        assert_eq!(doc.content, "caf\u{FFFD} mouse");
    }

    #[test]
    fn bad_depth_is_malformed() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("2"), "http://x\ndeep\nbody").unwrap();
        let dir = PageDir::new(tmp.path());
        assert!(matches!(dir.load(2), Err(TseError::MalformedDocument { doc_id: 2, .. })));
    }
}
