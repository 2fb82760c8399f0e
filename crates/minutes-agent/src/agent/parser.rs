//! Parsing of raw model completions into agent outputs.

use std::sync::LazyLock;

use regex::Regex;

use super::step::{AgentAction, AgentFinish, AgentOutput};
use crate::{Error, Result};

/// Marker that introduces the final task summary.
pub const FINAL_ANSWER_MARKER: &str = "Task Summary:";

static ACTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Action\s*\d*\s*:(.*?)\nAction\s*\d*\s*Input\s*\d*\s*:[\s]*(.*)")
        .expect("action pattern is a valid regex")
});

/// Turns model text into a structured value.
pub trait OutputParser: Send + Sync {
    /// The parsed value.
    type Output;

    /// Parses the raw model text.
    fn parse(&self, text: &str) -> Result<Self::Output>;

    /// Returns instructions describing the expected output format.
    fn format_instructions(&self) -> Result<String> {
        Err(Error::NotImplemented("format_instructions"))
    }
}

/// Parser for the `Task Summary:` / `Action:` + `Action Input:` format.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgentOutputParser;

impl AgentOutputParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self
    }
}

impl OutputParser for AgentOutputParser {
    type Output = AgentOutput;

    fn parse(&self, text: &str) -> Result<AgentOutput> {
        // The marker can also appear in echoed reasoning; the last one wins.
        if let Some((_, summary)) = text.rsplit_once(FINAL_ANSWER_MARKER) {
            return Ok(AgentOutput::FinalAnswer(AgentFinish::new(
                summary.trim(),
                text,
            )));
        }

        let captures = ACTION_PATTERN
            .captures(text)
            .ok_or_else(|| Error::parse(text))?;

        let tool = captures.get(1).map_or("", |m| m.as_str()).trim();
        let tool_input = captures.get(2).map_or("", |m| m.as_str());

        Ok(AgentOutput::ToolCall(AgentAction::new(
            tool,
            strip_quotes(tool_input.trim()),
            text,
        )))
    }
}

/// Removes at most one leading and one trailing double quote.
fn strip_quotes(input: &str) -> &str {
    let input = input.strip_prefix('"').unwrap_or(input);
    input.strip_suffix('"').unwrap_or(input)
}
