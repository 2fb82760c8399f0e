//! Loading of text documents from disk.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, TRACING_TARGET};

/// A loaded text document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Where the document was loaded from.
    pub source: PathBuf,
    /// The document text with `\n` line endings.
    pub content: String,
}

impl Document {
    /// Creates a document from in-memory text.
    pub fn new(source: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            content: content.into(),
        }
    }

    /// Returns the source as a display string.
    pub fn source_name(&self) -> String {
        self.source.display().to_string()
    }
}

/// Loads UTF-8 text documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentLoader;

impl DocumentLoader {
    /// Creates a new loader.
    pub fn new() -> Self {
        Self
    }

    /// Reads a document, normalizing `\r\n` line endings.
    ///
    /// Fails on unreadable files, non UTF-8 content and documents with no
    /// non-whitespace text.
    #[tracing::instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub async fn load(&self, path: impl AsRef<Path>) -> Result<Document> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|source| Error::Load {
            path: path.to_path_buf(),
            source,
        })?;

        let content = String::from_utf8(bytes).map_err(|_| Error::Encoding {
            path: path.to_path_buf(),
        })?;
        let content = content.replace("\r\n", "\n");

        if content.trim().is_empty() {
            return Err(Error::EmptyDocument {
                path: path.to_path_buf(),
            });
        }

        tracing::debug!(target: TRACING_TARGET, bytes = content.len(), "loaded document");
        Ok(Document::new(path, content))
    }
}
