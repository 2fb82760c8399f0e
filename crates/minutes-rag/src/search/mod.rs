//! Similarity search over indexed chunks.

mod retrieved;
mod store;

pub use retrieved::RetrievedChunk;
pub use store::{InMemoryVectorStore, StoredChunk, cosine_similarity};
