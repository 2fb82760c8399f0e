//! Error types for minutes-agent.

use std::fmt;

/// Result type alias for agent operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while assembling prompts, parsing model output
/// or running the agent loop.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Model output matched neither the final-answer nor the tool-call format.
    #[error("could not parse model output: `{text}`")]
    Parse { text: String },

    /// The model asked for a tool that is not registered.
    #[error("unknown tool: {tool}")]
    UnknownTool { tool: String },

    /// A tool with the same name is already registered.
    #[error("duplicate tool: {tool}")]
    DuplicateTool { tool: String },

    /// Tool execution error.
    #[error("tool error: {tool}: {message}")]
    Tool { tool: String, message: String },

    /// Provider error (API call failed, rate limited, etc.)
    #[error("provider error: {provider}: {message}")]
    Provider { provider: String, message: String },

    /// A template placeholder has no value.
    #[error("missing template variable: {name}")]
    MissingVariable { name: String },

    /// Malformed template.
    #[error("template error: {0}")]
    Template(String),

    /// The operation is part of the interface but intentionally unsupported.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    /// The loop ran out of iterations before reaching a final answer.
    #[error("agent stopped after {max_iterations} iterations without a final answer")]
    IterationLimit { max_iterations: usize },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Creates a parse error carrying the raw model output.
    pub fn parse(text: impl Into<String>) -> Self {
        Self::Parse { text: text.into() }
    }

    /// Creates an unknown tool error.
    pub fn unknown_tool(tool: impl fmt::Display) -> Self {
        Self::UnknownTool {
            tool: tool.to_string(),
        }
    }

    /// Creates a tool error.
    pub fn tool(tool: impl fmt::Display, message: impl fmt::Display) -> Self {
        Self::Tool {
            tool: tool.to_string(),
            message: message.to_string(),
        }
    }

    /// Creates a provider error.
    pub fn provider(provider: impl fmt::Display, message: impl fmt::Display) -> Self {
        Self::Provider {
            provider: provider.to_string(),
            message: message.to_string(),
        }
    }

    /// Creates a missing variable error.
    pub fn missing_variable(name: impl Into<String>) -> Self {
        Self::MissingVariable { name: name.into() }
    }

    /// Creates a template error.
    pub fn template(message: impl fmt::Display) -> Self {
        Self::Template(message.to_string())
    }

    /// Creates a configuration error.
    pub fn config(message: impl fmt::Display) -> Self {
        Self::Config(message.to_string())
    }

    /// Returns true if the error came from model output the parser rejected.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}
