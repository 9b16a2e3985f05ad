//! ClauseWatch Ingest — paragraph chunking and document loading.

pub mod chunking;
pub mod file;
pub mod loader;

pub use chunking::{chunk_text, CharCounter, Chunker, TokenCounter, WordCounter};
pub use file::{extract_text, FileType, LoadError};
pub use loader::{DocumentLoader, FsDocumentLoader};
