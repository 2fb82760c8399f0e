//! Embedding provider backed by rig-core models.

use std::sync::Arc;

use minutes_agent::provider::{ApiKeyCredentials, Credentials};
use rig::embeddings::EmbeddingModel as RigEmbeddingModel;
use rig::prelude::EmbeddingsClient;
use rig::providers::openai;

use super::model::{EmbeddingModel, OpenAiEmbeddingModel};
use super::{Embedder, Vector};
use crate::{Error, Result, TRACING_TARGET};

/// Embedding provider that wraps rig embedding model implementations.
///
/// This is a cheaply cloneable wrapper around an `Arc<EmbeddingService>`.
#[derive(Clone)]
pub struct EmbeddingProvider(Arc<EmbeddingService>);

enum EmbeddingService {
    OpenAi {
        model: openai::EmbeddingModel,
        model_name: String,
    },
}

impl EmbeddingProvider {
    /// Creates a provider from credentials and a model reference.
    pub fn new(credentials: &Credentials, model: &EmbeddingModel) -> Result<Self> {
        match (credentials, model) {
            (Credentials::OpenAi(c), EmbeddingModel::OpenAi(m)) => Self::openai(c, *m),
            (other, _) => Err(Error::config(format!(
                "{} does not support embeddings",
                other.provider()
            ))),
        }
    }

    /// Creates an OpenAI embedding provider.
    pub fn openai(credentials: &ApiKeyCredentials, model: OpenAiEmbeddingModel) -> Result<Self> {
        let client = openai::Client::new(&credentials.api_key)
            .map_err(|e| Error::provider("openai", e.to_string()))?;
        Ok(Self(Arc::new(EmbeddingService::OpenAi {
            model: client.embedding_model_with_ndims(model.as_ref(), model.dimensions()),
            model_name: model.to_string(),
        })))
    }

    /// Returns the provider name.
    pub fn provider_name(&self) -> &'static str {
        match self.0.as_ref() {
            EmbeddingService::OpenAi { .. } => "openai",
        }
    }
}

#[async_trait::async_trait]
impl Embedder for EmbeddingProvider {
    fn model_name(&self) -> &str {
        match self.0.as_ref() {
            EmbeddingService::OpenAi { model_name, .. } => model_name,
        }
    }

    fn ndims(&self) -> usize {
        match self.0.as_ref() {
            EmbeddingService::OpenAi { model, .. } => model.ndims(),
        }
    }

    #[tracing::instrument(skip(self, texts), fields(model = self.model_name(), count = texts.len()))]
    async fn embed_texts(&self, texts: Vec<String>) -> Result<Vec<Vector>> {
        let expected = texts.len();
        let embeddings = match self.0.as_ref() {
            EmbeddingService::OpenAi { model, .. } => model.embed_texts(texts).await,
        }
        .map_err(|e| Error::provider(self.provider_name(), e.to_string()))?;

        if embeddings.len() != expected {
            return Err(Error::embedding(format!(
                "embedding count mismatch: expected {expected}, got {}",
                embeddings.len()
            )));
        }

        tracing::debug!(target: TRACING_TARGET, count = embeddings.len(), "embedded texts");
        Ok(embeddings.into_iter().map(|embedding| embedding.vec).collect())
    }
}

impl std::fmt::Debug for EmbeddingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.as_ref() {
            EmbeddingService::OpenAi { model, model_name } => f
                .debug_struct("EmbeddingProvider::OpenAi")
                .field("model", model_name)
                .field("ndims", &model.ndims())
                .finish(),
        }
    }
}
