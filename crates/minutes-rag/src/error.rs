//! Error types for minutes-rag.

use std::path::PathBuf;

/// Result type alias for retrieval operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, indexing or querying documents.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document could not be read.
    #[error("failed to load {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid UTF-8 text.
    #[error("{path} is not valid UTF-8 text")]
    Encoding { path: PathBuf },

    /// The document has no content.
    #[error("{path} is empty")]
    EmptyDocument { path: PathBuf },

    /// Embedding request failed or returned unusable vectors.
    #[error("embedding error: {0}")]
    Embedding(String),

    /// Provider error (API call failed, rate limited, etc.)
    #[error("provider error: {provider}: {message}")]
    Provider { provider: String, message: String },

    /// The completion model failed while answering.
    #[error(transparent)]
    Agent(#[from] minutes_agent::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Creates an embedding error.
    pub fn embedding(message: impl std::fmt::Display) -> Self {
        Self::Embedding(message.to_string())
    }

    /// Creates a provider error.
    pub fn provider(provider: impl std::fmt::Display, message: impl std::fmt::Display) -> Self {
        Self::Provider {
            provider: provider.to_string(),
            message: message.to_string(),
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl std::fmt::Display) -> Self {
        Self::Config(message.to_string())
    }
}
