//! Retrieved chunk types for search results.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::splitter::SplitMetadata;

/// A retrieved chunk with content and similarity score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedChunk {
    /// Chunk ID assigned at indexing time.
    pub id: Uuid,

    /// Document the chunk was cut from.
    pub source: String,

    /// Cosine similarity (-1.0 to 1.0, higher is more similar).
    pub score: f64,

    /// Chunk metadata (index and offsets).
    pub metadata: SplitMetadata,

    /// The chunk text.
    pub content: String,
}
