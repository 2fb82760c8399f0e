//! Tool registry for managing available tools.

use std::sync::Arc;

use super::Tool;
use crate::{Error, Result};

/// Ordered registry of available tools.
///
/// Registration order is preserved; it is the order tools are listed in the
/// prompt. Names are unique and matched case-sensitively.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool.
    ///
    /// Fails with [`Error::DuplicateTool`] if a tool with the same name is
    /// already registered.
    pub fn register(&mut self, tool: impl Tool + 'static) -> Result<()> {
        self.register_arc(Arc::new(tool))
    }

    /// Registers a shared tool.
    pub fn register_arc(&mut self, tool: Arc<dyn Tool>) -> Result<()> {
        if self.has_tool(tool.name()) {
            return Err(Error::DuplicateTool {
                tool: tool.name().to_string(),
            });
        }

        tracing::debug!(
            target: crate::TRACING_TARGET,
            tool = tool.name(),
            "registered tool"
        );
        self.tools.push(tool);
        Ok(())
    }

    /// Returns a tool by exact name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|tool| tool.name() == name)
    }

    /// Returns whether a tool exists.
    pub fn has_tool(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns all tools in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Tool>> {
        self.tools.iter()
    }

    /// Returns all tool names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|tool| tool.name()).collect()
    }

    /// Returns the number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use futures::FutureExt;

    use super::*;
    use crate::tool::FnTool;

    fn echo(name: &str) -> FnTool {
        FnTool::new(name, format!("{name} tool"), |input: String| {
            async move { Ok(input) }.boxed()
        })
    }

    #[test]
    fn registry_preserves_order() {
        let mut registry = ToolRegistry::new();
        registry.register(echo("zeta")).unwrap();
        registry.register(echo("alpha")).unwrap();
        registry.register(echo("mid")).unwrap();

        assert_eq!(registry.names(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn registry_rejects_duplicates() {
        let mut registry = ToolRegistry::new();
        registry.register(echo("search")).unwrap();

        let error = registry.register(echo("search")).unwrap_err();
        assert!(matches!(error, Error::DuplicateTool { tool } if tool == "search"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn registry_lookup_is_case_sensitive() {
        let mut registry = ToolRegistry::new();
        registry.register(echo("Search")).unwrap();

        assert!(registry.has_tool("Search"));
        assert!(!registry.has_tool("search"));
        assert!(registry.get("SEARCH").is_none());
    }
}
