//! Document loader seam used by the pipeline's Load stage.

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::file::{self, LoadError};

/// Turns a document path into raw text.
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    async fn read(&self, path: &Path) -> Result<String, LoadError>;
}

/// Reads documents from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDocumentLoader;

#[async_trait]
impl DocumentLoader for FsDocumentLoader {
    async fn read(&self, path: &Path) -> Result<String, LoadError> {
        let owned = path.to_path_buf();
        let text = tokio::task::spawn_blocking(move || file::extract_text(&owned))
            .await
            .map_err(|e| LoadError::Unreadable(format!("Extraction task failed: {}", e)))??;

        debug!("Extracted {} chars from {}", text.len(), path.display());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fs_loader_reads_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "  Quarterly review.  ").unwrap();

        let text = FsDocumentLoader.read(&path).await.unwrap();
        assert_eq!(text, "Quarterly review.");
    }

    #[tokio::test]
    async fn test_fs_loader_propagates_not_found() {
        let err = FsDocumentLoader
            .read(Path::new("/no/such/file.docx"))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }
}
