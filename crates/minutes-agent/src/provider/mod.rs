//! Model providers for the agent.
//!
//! The agent only needs "prompt in, text out"; [`ChatModel`] is that seam.
//! [`CompletionProvider`] implements it over rig-core's OpenAI and Anthropic
//! clients, and tests implement it with scripted completions.

mod completion;
mod credentials;

pub use completion::{
    AnthropicModel, CompletionModel, CompletionProvider, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE,
    OpenAiCompletionModel,
};
pub use credentials::{ApiKeyCredentials, Credentials};

use crate::Result;

/// A text completion model.
#[async_trait::async_trait]
pub trait ChatModel: Send + Sync {
    /// Returns the model identifier.
    fn model_name(&self) -> &str;

    /// Sends one prompt and returns the completion text.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
