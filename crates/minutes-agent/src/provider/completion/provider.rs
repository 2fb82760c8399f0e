//! Completion provider backed by rig-core models.

use std::sync::Arc;

use rig::completion::{AssistantContent, CompletionError, CompletionModel as RigCompletionModel};
use rig::one_or_many::OneOrMany;
use rig::prelude::CompletionClient;
use rig::providers::{anthropic, openai};

use super::super::ChatModel;
use super::super::credentials::Credentials;
use super::model::{AnthropicModel, CompletionModel, OpenAiCompletionModel};
use crate::{Error, Result, TRACING_TARGET};

/// Default sampling temperature; the agent format needs deterministic output.
pub const DEFAULT_TEMPERATURE: f64 = 0.0;

/// Default completion length limit.
pub const DEFAULT_MAX_TOKENS: u64 = 1024;

/// Completion provider that wraps different rig completion model implementations.
///
/// Cloning is cheap: the underlying model is shared.
#[derive(Clone)]
pub struct CompletionProvider {
    service: Arc<CompletionService>,
    temperature: f64,
    max_tokens: u64,
}

enum CompletionService {
    OpenAi {
        model: openai::CompletionModel,
        model_name: String,
    },
    Anthropic {
        model: anthropic::completion::CompletionModel,
        model_name: String,
    },
}

impl CompletionProvider {
    /// Creates a provider from credentials and a model reference.
    ///
    /// Fails with [`Error::Config`] when the credentials belong to another
    /// provider than the model.
    pub fn new(credentials: &Credentials, model: &CompletionModel) -> Result<Self> {
        match (credentials, model) {
            (Credentials::OpenAi(c), CompletionModel::OpenAi(m)) => Self::openai(&c.api_key, *m),
            (Credentials::Anthropic(c), CompletionModel::Anthropic(m)) => {
                Self::anthropic(&c.api_key, *m)
            }
            _ => Err(Error::config(format!(
                "credentials for {} cannot be used with {} model {}",
                credentials.provider(),
                model.provider(),
                model.as_str()
            ))),
        }
    }

    /// Creates an OpenAI completion provider.
    pub fn openai(api_key: &str, model: OpenAiCompletionModel) -> Result<Self> {
        let client = openai::Client::new(api_key)
            .map_err(|e| Error::provider("openai", e.to_string()))?
            .completions_api();
        Ok(Self::from_service(CompletionService::OpenAi {
            model: client.completion_model(model.as_ref()),
            model_name: model.as_ref().to_string(),
        }))
    }

    /// Creates an Anthropic completion provider.
    pub fn anthropic(api_key: &str, model: AnthropicModel) -> Result<Self> {
        let client = anthropic::Client::new(api_key)
            .map_err(|e| Error::provider("anthropic", e.to_string()))?;
        Ok(Self::from_service(CompletionService::Anthropic {
            model: client.completion_model(model.as_ref()),
            model_name: model.as_ref().to_string(),
        }))
    }

    fn from_service(service: CompletionService) -> Self {
        Self {
            service: Arc::new(service),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the completion length limit.
    pub fn with_max_tokens(mut self, max_tokens: u64) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Returns the sampling temperature.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Returns the provider name.
    pub fn provider_name(&self) -> &'static str {
        match self.service.as_ref() {
            CompletionService::OpenAi { .. } => "openai",
            CompletionService::Anthropic { .. } => "anthropic",
        }
    }
}

#[async_trait::async_trait]
impl ChatModel for CompletionProvider {
    fn model_name(&self) -> &str {
        match self.service.as_ref() {
            CompletionService::OpenAi { model_name, .. } => model_name,
            CompletionService::Anthropic { model_name, .. } => model_name,
        }
    }

    #[tracing::instrument(
        skip(self, prompt),
        fields(provider = self.provider_name(), model = self.model_name(), prompt_len = prompt.len())
    )]
    async fn complete(&self, prompt: &str) -> Result<String> {
        let provider = self.provider_name();
        let map_err = |e: CompletionError| Error::provider(provider, e.to_string());

        let text = match self.service.as_ref() {
            CompletionService::OpenAi { model, .. } => model
                .completion_request(prompt)
                .temperature(self.temperature)
                .max_tokens(self.max_tokens)
                .send()
                .await
                .map(|r| extract_text_content(&r.choice))
                .map_err(map_err)?,
            CompletionService::Anthropic { model, .. } => model
                .completion_request(prompt)
                .temperature(self.temperature)
                .max_tokens(self.max_tokens)
                .send()
                .await
                .map(|r| extract_text_content(&r.choice))
                .map_err(map_err)?,
        };

        tracing::debug!(target: TRACING_TARGET, completion_len = text.len(), "completion received");
        Ok(text)
    }
}

/// Extracts text content from assistant content choices.
fn extract_text_content(choice: &OneOrMany<AssistantContent>) -> String {
    choice
        .iter()
        .filter_map(|content| match content {
            AssistantContent::Text(text) => Some(text.text()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("")
}

impl std::fmt::Debug for CompletionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionProvider")
            .field("provider", &self.provider_name())
            .field("model", &self.model_name())
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}
