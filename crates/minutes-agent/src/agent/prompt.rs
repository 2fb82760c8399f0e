//! Prompt assembly for the agent.

use super::step::AgentStep;
use super::template::{BasePromptTemplate, PromptTemplate, TemplateValues};
use crate::Result;
use crate::tool::ToolRegistry;

/// Placeholder for the `name: description` tool listing.
pub const TOOLS_VARIABLE: &str = "tools";
/// Placeholder for the newline-joined tool names.
pub const TOOL_NAMES_VARIABLE: &str = "tool_names";
/// Placeholder for the task description.
pub const INPUT_VARIABLE: &str = "input";
/// Placeholder for the serialized scratchpad.
pub const SCRATCHPAD_VARIABLE: &str = "agent_scratchpad";

const PREAMBLE: &str = "\
Complete the following task as best you can. You have access to the following tools:

{tools}";

const FORMAT_INSTRUCTIONS: &str = "\
Use the following format:

Task: the task you must complete
Thought: you should always think about what to do next
Action: the action to take, should be one of the following tools:
{tool_names}
Action Input: the input to the action
Observation: the result of the action
... (this Thought/Action/Action Input/Observation can repeat N times)
Thought: I have now completed the task
Task Summary: a short summary of everything that was done";

const SUFFIX: &str = "\
Begin! Look up anything you need in the meeting minutes before acting, \
and only report the task summary once every part of the task is done.

Task: {input}
{agent_scratchpad}";

/// Returns the default agent template text.
pub fn default_template() -> String {
    [PREAMBLE, FORMAT_INSTRUCTIONS, SUFFIX].join("\n\n")
}

/// Renders the tool list and scratchpad into the agent prompt.
#[derive(Debug, Clone)]
pub struct AgentPrompt {
    template: PromptTemplate,
}

impl AgentPrompt {
    /// Creates a prompt using the default template.
    pub fn new() -> Self {
        Self {
            template: PromptTemplate::new(default_template())
                .expect("default agent template is well formed"),
        }
    }

    /// Creates a prompt from a custom template.
    ///
    /// The template may reference `{tools}`, `{tool_names}`, `{input}` and
    /// `{agent_scratchpad}`. Any other placeholder fails at format time.
    pub fn with_template(template: PromptTemplate) -> Self {
        Self { template }
    }

    /// Returns the underlying template.
    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }

    /// Builds the full prompt for the next model call.
    pub fn format(&self, tools: &ToolRegistry, input: &str, steps: &[AgentStep]) -> Result<String> {
        let values: TemplateValues<'_> = [
            (TOOLS_VARIABLE, Self::render_tools(tools)),
            (TOOL_NAMES_VARIABLE, Self::render_tool_names(tools)),
            (INPUT_VARIABLE, input.to_string()),
            (SCRATCHPAD_VARIABLE, Self::render_scratchpad(steps)),
        ]
        .into_iter()
        .collect();

        self.template.format(&values)
    }

    /// Renders one `name: description` line per tool, in registry order.
    pub fn render_tools(tools: &ToolRegistry) -> String {
        tools
            .iter()
            .map(|tool| format!("{}: {}", tool.name(), tool.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Renders the tool names, one per line.
    pub fn render_tool_names(tools: &ToolRegistry) -> String {
        tools.names().join("\n")
    }

    /// Serializes previous steps into the scratchpad segment.
    ///
    /// Each step contributes its action log, the observation and a trailing
    /// `Thought:` cue. No steps render as the empty string.
    pub fn render_scratchpad(steps: &[AgentStep]) -> String {
        let mut scratchpad = String::new();
        for step in steps {
            scratchpad.push_str(&step.action.log);
            scratchpad.push_str("\nObservation: ");
            scratchpad.push_str(&step.observation);
            scratchpad.push_str("\nThought:");
        }
        scratchpad
    }
}

impl Default for AgentPrompt {
    fn default() -> Self {
        Self::new()
    }
}
