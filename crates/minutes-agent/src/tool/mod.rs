//! Tool module for agent capabilities.
//!
//! A tool is a named, described capability the agent can invoke with a
//! single string and that answers with a single string. Tools may have side
//! effects (network calls, outbound email).
//!
//! - [`Tool`] - The object-safe tool trait
//! - [`FnTool`] - A tool backed by an async closure
//! - [`ToolRegistry`] - Ordered, name-unique collection of tools

mod registry;

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
pub use registry::ToolRegistry;

use crate::Result;

/// A capability exposed to the agent.
///
/// The name must be unique within a [`ToolRegistry`]; it is what the model
/// writes after `Action:`. The description is shown to the model verbatim.
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Returns the tool name.
    fn name(&self) -> &str;

    /// Returns the tool description shown in the prompt.
    fn description(&self) -> &str;

    /// Invokes the tool with the parsed action input.
    async fn call(&self, input: &str) -> Result<String>;
}

/// Handler function for closure-backed tools.
pub type ToolHandler = Arc<dyn Fn(String) -> BoxFuture<'static, Result<String>> + Send + Sync>;

/// A tool whose behavior is an async closure.
#[derive(Clone)]
pub struct FnTool {
    name: String,
    description: String,
    handler: ToolHandler,
}

impl FnTool {
    /// Creates a new closure-backed tool.
    pub fn new<F>(name: impl Into<String>, description: impl Into<String>, handler: F) -> Self
    where
        F: Fn(String) -> BoxFuture<'static, Result<String>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            handler: Arc::new(handler),
        }
    }
}

#[async_trait::async_trait]
impl Tool for FnTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn call(&self, input: &str) -> Result<String> {
        (self.handler)(input.to_string()).await
    }
}

impl fmt::Debug for FnTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTool")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use futures::FutureExt;

    use super::*;

    #[tokio::test]
    async fn fn_tool_calls_handler() {
        let tool = FnTool::new("shout", "Uppercases the input", |input: String| {
            async move { Ok(input.to_uppercase()) }.boxed()
        });

        assert_eq!(tool.name(), "shout");
        assert_eq!(tool.description(), "Uppercases the input");
        assert_eq!(tool.call("quiet").await.unwrap(), "QUIET");
    }

    #[tokio::test]
    async fn fn_tool_propagates_errors() {
        let tool = FnTool::new("broken", "Always fails", |_input: String| {
            async move { Err(crate::Error::tool("broken", "boom")) }.boxed()
        });

        let error = tool.call("anything").await.unwrap_err();
        assert!(matches!(error, crate::Error::Tool { .. }));
    }
}
