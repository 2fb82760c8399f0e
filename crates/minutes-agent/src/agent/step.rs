//! Agent actions, final answers and the per-run scratchpad.

use serde::{Deserialize, Serialize};

/// A tool invocation chosen by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentAction {
    /// Name of the tool to invoke.
    pub tool: String,

    /// Input passed to the tool.
    pub tool_input: String,

    /// Raw model text that led to this action.
    pub log: String,
}

impl AgentAction {
    /// Creates a new action.
    pub fn new(
        tool: impl Into<String>,
        tool_input: impl Into<String>,
        log: impl Into<String>,
    ) -> Self {
        Self {
            tool: tool.into(),
            tool_input: tool_input.into(),
            log: log.into(),
        }
    }
}

/// The terminal answer of an agent run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentFinish {
    /// The task summary reported by the model.
    pub summary: String,

    /// Raw model text the summary was extracted from.
    pub log: String,
}

impl AgentFinish {
    /// Creates a new final answer.
    pub fn new(summary: impl Into<String>, log: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            log: log.into(),
        }
    }
}

/// Parsed model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentOutput {
    /// Invoke a tool and continue.
    ToolCall(AgentAction),
    /// Stop with a final answer.
    FinalAnswer(AgentFinish),
}

/// One executed action and the observation it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStep {
    /// The action that was taken.
    pub action: AgentAction,

    /// The tool's textual result.
    pub observation: String,
}

impl AgentStep {
    /// Creates a new step.
    pub fn new(action: AgentAction, observation: impl Into<String>) -> Self {
        Self {
            action,
            observation: observation.into(),
        }
    }
}

/// Append-only history of the steps taken during a single run.
#[derive(Debug, Clone, Default)]
pub struct Scratchpad {
    steps: Vec<AgentStep>,
}

impl Scratchpad {
    /// Creates an empty scratchpad.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step.
    pub fn push(&mut self, step: AgentStep) {
        self.steps.push(step);
    }

    /// Returns the steps in insertion order.
    pub fn steps(&self) -> &[AgentStep] {
        &self.steps
    }

    /// Returns the number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns whether no step has been taken yet.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Consumes the scratchpad and returns its steps.
    pub fn into_steps(self) -> Vec<AgentStep> {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scratchpad_keeps_insertion_order() {
        let mut scratchpad = Scratchpad::new();
        assert!(scratchpad.is_empty());

        scratchpad.push(AgentStep::new(AgentAction::new("a", "1", "log a"), "obs a"));
        scratchpad.push(AgentStep::new(AgentAction::new("b", "2", "log b"), "obs b"));

        let tools: Vec<_> = scratchpad.steps().iter().map(|s| s.action.tool.as_str()).collect();
        assert_eq!(tools, vec!["a", "b"]);
        assert_eq!(scratchpad.len(), 2);
    }

    #[test]
    fn agent_output_serializes_tagged() {
        let output = AgentOutput::FinalAnswer(AgentFinish::new("Done.", "Task Summary: Done."));
        let json = serde_json::to_value(&output).unwrap();

        assert_eq!(json["type"], "final_answer");
        assert_eq!(json["summary"], "Done.");
    }
}
