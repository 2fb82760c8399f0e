//! Document chunk indexing pipeline.

use std::sync::Arc;

use crate::embedding::Embedder;
use crate::search::InMemoryVectorStore;
use crate::splitter::Splitter;
use crate::{Document, Error, RagConfig, Result, TRACING_TARGET};

/// Splits documents, embeds the chunks in batches and stores them.
pub struct Indexer {
    embedder: Arc<dyn Embedder>,
    splitter: Splitter,
}

impl Indexer {
    /// Creates an indexer using the chunking settings of `config`.
    pub fn new(embedder: Arc<dyn Embedder>, config: &RagConfig) -> Result<Self> {
        Ok(Self {
            embedder,
            splitter: Splitter::from_config(config)?,
        })
    }

    /// Creates an indexer with an explicit splitter.
    pub fn with_splitter(embedder: Arc<dyn Embedder>, splitter: Splitter) -> Self {
        Self { embedder, splitter }
    }

    /// Indexes a document into `store`, returning the number of chunks added.
    #[tracing::instrument(
        skip(self, document, store),
        fields(source = %document.source.display(), model = self.embedder.model_name())
    )]
    pub async fn index(&self, document: &Document, store: &mut InMemoryVectorStore) -> Result<usize> {
        let chunks = self.splitter.split_owned(&document.content);
        if chunks.is_empty() {
            return Ok(0);
        }

        let batch_size = self.embedder.max_batch_size().max(1);
        let mut embeddings = Vec::with_capacity(chunks.len());
        for batch in chunks.chunks(batch_size) {
            let texts: Vec<String> = batch.iter().map(|c| c.text.clone()).collect();
            embeddings.extend(self.embedder.embed_texts(texts).await?);
        }

        if embeddings.len() != chunks.len() {
            return Err(Error::embedding(format!(
                "embedding count mismatch: expected {}, got {}",
                chunks.len(),
                embeddings.len()
            )));
        }

        let source = document.source_name();
        let count = chunks.len();
        for (chunk, embedding) in chunks.into_iter().zip(embeddings) {
            store.insert(source.clone(), chunk, embedding)?;
        }

        tracing::info!(target: TRACING_TARGET, chunks = count, "indexed document");
        Ok(count)
    }
}

impl std::fmt::Debug for Indexer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Indexer")
            .field("model", &self.embedder.model_name())
            .field("splitter", &self.splitter)
            .finish()
    }
}
