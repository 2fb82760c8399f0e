//! Brute-force in-memory vector index.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::RetrievedChunk;
use crate::embedding::Vector;
use crate::splitter::{OwnedSplitChunk, SplitMetadata};
use crate::{Error, Result, TRACING_TARGET};

/// A chunk stored together with its embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredChunk {
    /// Chunk ID.
    pub id: Uuid,
    /// Document the chunk was cut from.
    pub source: String,
    /// The chunk text.
    pub content: String,
    /// Chunk metadata.
    pub metadata: SplitMetadata,
    /// Embedding of the chunk text.
    pub embedding: Vector,
}

/// In-memory vector index ranked by cosine similarity.
///
/// All stored vectors must share one dimensionality; the first insert fixes it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryVectorStore {
    chunks: Vec<StoredChunk>,
    ndims: Option<usize>,
}

impl InMemoryVectorStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Returns whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Returns the stored chunks in insertion order.
    pub fn chunks(&self) -> &[StoredChunk] {
        &self.chunks
    }

    /// Stores a chunk and its embedding, returning the new chunk ID.
    pub fn insert(
        &mut self,
        source: impl Into<String>,
        chunk: OwnedSplitChunk,
        embedding: Vector,
    ) -> Result<Uuid> {
        self.check_dimensions(embedding.len())?;
        self.ndims.get_or_insert(embedding.len());

        let id = Uuid::now_v7();
        self.chunks.push(StoredChunk {
            id,
            source: source.into(),
            content: chunk.text,
            metadata: chunk.metadata,
            embedding,
        });
        Ok(id)
    }

    /// Returns up to `limit` chunks most similar to `query`, best first.
    ///
    /// Chunks scoring below `min_score` are dropped. Ties keep insertion order.
    pub fn search(
        &self,
        query: &[f64],
        limit: usize,
        min_score: Option<f64>,
    ) -> Result<Vec<RetrievedChunk>> {
        if self.chunks.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }
        self.check_dimensions(query.len())?;

        let mut scored: Vec<(f64, &StoredChunk)> = self
            .chunks
            .iter()
            .map(|chunk| (cosine_similarity(query, &chunk.embedding), chunk))
            .filter(|(score, _)| min_score.is_none_or(|min| *score >= min))
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.truncate(limit);

        tracing::debug!(
            target: TRACING_TARGET,
            candidates = self.chunks.len(),
            returned = scored.len(),
            "vector search"
        );

        Ok(scored
            .into_iter()
            .map(|(score, chunk)| RetrievedChunk {
                id: chunk.id,
                source: chunk.source.clone(),
                score,
                metadata: chunk.metadata,
                content: chunk.content.clone(),
            })
            .collect())
    }

    fn check_dimensions(&self, len: usize) -> Result<()> {
        if len == 0 {
            return Err(Error::embedding("empty embedding vector"));
        }
        match self.ndims {
            Some(ndims) if ndims != len => Err(Error::embedding(format!(
                "dimension mismatch: index has {ndims}, vector has {len}"
            ))),
            _ => Ok(()),
        }
    }
}

/// Cosine similarity of two equally sized vectors; zero if either has no norm.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let (dot, norm_a, norm_b) = a
        .iter()
        .zip(b)
        .fold((0.0, 0.0, 0.0), |(dot, na, nb), (x, y)| {
            (dot + x * y, na + x * x, nb + y * y)
        });

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(index: u32, text: &str) -> OwnedSplitChunk {
        OwnedSplitChunk {
            text: text.to_string(),
            metadata: SplitMetadata::new(index, 0, text.len() as u32),
        }
    }

    fn store() -> InMemoryVectorStore {
        let mut store = InMemoryVectorStore::new();
        store.insert("m.txt", chunk(0, "budget"), vec![1.0, 0.0]).unwrap();
        store.insert("m.txt", chunk(1, "launch"), vec![0.0, 1.0]).unwrap();
        store.insert("m.txt", chunk(2, "budget launch"), vec![1.0, 1.0]).unwrap();
        store
    }

    #[test]
    fn cosine_similarity_basics() {
        assert!((cosine_similarity(&[1.0, 0.0], &[2.0, 0.0]) - 1.0).abs() < 1e-12);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 3.0]).abs() < 1e-12);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-12);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn search_ranks_by_similarity() {
        let results = store().search(&[1.0, 0.1], 3, None).unwrap();
        let contents: Vec<_> = results.iter().map(|r| r.content.as_str()).collect();

        assert_eq!(contents, vec!["budget", "budget launch", "launch"]);
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn search_respects_limit_and_min_score() {
        let store = store();
        assert_eq!(store.search(&[1.0, 0.1], 1, None).unwrap().len(), 1);

        let filtered = store.search(&[1.0, 0.0], 5, Some(0.5)).unwrap();
        let contents: Vec<_> = filtered.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(contents, vec!["budget", "budget launch"]);
    }

    #[test]
    fn empty_store_returns_nothing() {
        let results = InMemoryVectorStore::new().search(&[1.0], 4, None).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let mut store = store();
        assert!(matches!(
            store.insert("m.txt", chunk(3, "x"), vec![1.0, 2.0, 3.0]),
            Err(Error::Embedding(_))
        ));
        assert!(matches!(
            store.search(&[1.0], 2, None),
            Err(Error::Embedding(_))
        ));
    }
}
