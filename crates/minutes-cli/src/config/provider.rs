//! Model provider configuration.

use std::str::FromStr;

use anyhow::Context;
use clap::{Args, ValueEnum};
use minutes_agent::provider::{
    AnthropicModel, ApiKeyCredentials, CompletionModel, CompletionProvider, Credentials,
    OpenAiCompletionModel,
};
use minutes_rag::embedding::{EmbeddingModel, EmbeddingProvider, OpenAiEmbeddingModel};
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Backend serving the completion model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionBackend {
    /// OpenAI chat completions.
    #[value(name = "openai")]
    OpenAi,
    /// Anthropic messages.
    Anthropic,
}

/// Completion and embedding provider configuration.
#[derive(Clone, Args, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Backend used for the agent and QA completions
    #[arg(long, env = "COMPLETION_PROVIDER", value_enum, default_value_t = CompletionBackend::OpenAi)]
    pub completion_provider: CompletionBackend,

    /// Completion model identifier
    #[arg(long, env = "COMPLETION_MODEL", default_value = "gpt-4o-mini")]
    pub completion_model: String,

    /// Sampling temperature for completions
    #[arg(long, env = "COMPLETION_TEMPERATURE", default_value_t = minutes_agent::provider::DEFAULT_TEMPERATURE)]
    pub temperature: f64,

    /// OpenAI embedding model identifier
    #[arg(long, env = "EMBEDDING_MODEL", default_value = "text-embedding-ada-002")]
    pub embedding_model: String,

    /// OpenAI API key (embeddings, and completions with the openai backend)
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    #[serde(skip_serializing, default)]
    pub openai_api_key: String,

    /// Anthropic API key (completions with the anthropic backend)
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    #[serde(skip_serializing, default)]
    pub anthropic_api_key: Option<String>,
}

impl ProviderConfig {
    /// Resolves the typed completion model.
    pub fn completion_model(&self) -> anyhow::Result<CompletionModel> {
        let name = self.completion_model.as_str();
        let model = match self.completion_provider {
            CompletionBackend::OpenAi => CompletionModel::OpenAi(
                OpenAiCompletionModel::from_str(name)
                    .with_context(|| format!("unknown OpenAI completion model: {name}"))?,
            ),
            CompletionBackend::Anthropic => CompletionModel::Anthropic(
                AnthropicModel::from_str(name)
                    .with_context(|| format!("unknown Anthropic model: {name}"))?,
            ),
        };
        Ok(model)
    }

    /// Resolves the typed embedding model.
    pub fn embedding_model(&self) -> anyhow::Result<EmbeddingModel> {
        let name = self.embedding_model.as_str();
        let model = OpenAiEmbeddingModel::from_str(name)
            .with_context(|| format!("unknown OpenAI embedding model: {name}"))?;
        Ok(EmbeddingModel::OpenAi(model))
    }

    /// Returns the credentials for the completion backend.
    pub fn completion_credentials(&self) -> anyhow::Result<Credentials> {
        match self.completion_provider {
            CompletionBackend::OpenAi => Ok(Credentials::OpenAi(self.openai_credentials()?)),
            CompletionBackend::Anthropic => {
                let api_key = self
                    .anthropic_api_key
                    .as_deref()
                    .filter(|key| !key.is_empty())
                    .context("ANTHROPIC_API_KEY is required for the anthropic backend")?;
                Ok(Credentials::Anthropic(ApiKeyCredentials::new(api_key)))
            }
        }
    }

    fn openai_credentials(&self) -> anyhow::Result<ApiKeyCredentials> {
        anyhow::ensure!(!self.openai_api_key.is_empty(), "OPENAI_API_KEY must not be empty");
        Ok(ApiKeyCredentials::new(&self.openai_api_key))
    }

    /// Validates model names, keys and the temperature range.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.completion_model()?;
        self.embedding_model()?;
        self.completion_credentials()?;
        anyhow::ensure!(
            (0.0..=2.0).contains(&self.temperature),
            "temperature must be between 0.0 and 2.0, got {}",
            self.temperature
        );
        Ok(())
    }

    /// Logs provider configuration (no secrets).
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            completion_provider = ?self.completion_provider,
            completion_model = %self.completion_model,
            temperature = self.temperature,
            embedding_model = %self.embedding_model,
            "Provider configuration"
        );
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("completion_provider", &self.completion_provider)
            .field("completion_model", &self.completion_model)
            .field("temperature", &self.temperature)
            .field("embedding_model", &self.embedding_model)
            .finish_non_exhaustive()
    }
}

/// Creates the completion provider used by the agent and the QA chain.
pub fn create_completion_provider(config: &ProviderConfig) -> anyhow::Result<CompletionProvider> {
    let provider = CompletionProvider::new(
        &config.completion_credentials()?,
        &config.completion_model()?,
    )
    .context("failed to create completion provider")?;
    Ok(provider.with_temperature(config.temperature))
}

/// Creates the embedding provider used for indexing and retrieval.
pub fn create_embedding_provider(config: &ProviderConfig) -> anyhow::Result<EmbeddingProvider> {
    let credentials = Credentials::OpenAi(config.openai_credentials()?);
    EmbeddingProvider::new(&credentials, &config.embedding_model()?)
        .context("failed to create embedding provider")
}
