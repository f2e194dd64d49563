pub mod builder;
pub mod error;
pub mod index;
pub mod pagedir;
pub mod persist;
pub mod posting;
pub mod query;
pub mod rank;
pub mod tokenizer;

pub use builder::IndexBuilder;
pub use error::{Result, TseError};
pub use index::Index;
pub use pagedir::{Document, DocumentStore, PageDir};
pub use posting::PostingSet;
pub use query::{Query, QueryError, Token};
pub use rank::{rank, RankedDoc};

pub type DocId = u32;
