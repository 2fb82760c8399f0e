//! Text embedding.
//!
//! [`Embedder`] is the seam between the index and the embedding backend.
//! [`EmbeddingProvider`] implements it over rig-core's OpenAI embeddings.

mod model;
mod provider;

pub use model::{EmbeddingModel, OpenAiEmbeddingModel};
pub use provider::EmbeddingProvider;

use crate::Result;

/// Default maximum documents per embedding request.
pub const DEFAULT_MAX_DOCUMENTS: usize = 96;

/// A dense embedding vector.
pub type Vector = Vec<f64>;

/// Turns texts into dense vectors.
#[async_trait::async_trait]
pub trait Embedder: Send + Sync {
    /// Returns the model identifier.
    fn model_name(&self) -> &str;

    /// Returns the number of dimensions of the produced vectors.
    fn ndims(&self) -> usize;

    /// Returns the largest number of texts accepted by one request.
    fn max_batch_size(&self) -> usize {
        DEFAULT_MAX_DOCUMENTS
    }

    /// Embeds texts, returning one vector per text in input order.
    async fn embed_texts(&self, texts: Vec<String>) -> Result<Vec<Vector>>;

    /// Embeds a single text.
    async fn embed_text(&self, text: &str) -> Result<Vector> {
        self.embed_texts(vec![text.to_string()])
            .await?
            .pop()
            .ok_or_else(|| crate::Error::embedding("provider returned no embedding"))
    }
}
