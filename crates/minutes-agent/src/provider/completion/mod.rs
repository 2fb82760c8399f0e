//! Completion models and providers.

mod model;
mod provider;

pub use model::{AnthropicModel, CompletionModel, OpenAiCompletionModel};
pub use provider::{CompletionProvider, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
