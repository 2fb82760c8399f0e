//! Agent module: prompt assembly, output parsing and the control loop.
//!
//! - [`AgentPrompt`] - Renders tools, task and scratchpad into one prompt
//! - [`AgentOutputParser`] - Classifies a completion as a tool call or a final answer
//! - [`AgentExecutor`] - Runs the call, parse, invoke, observe loop
//! - [`PromptTemplate`] - `{placeholder}` templates behind [`BasePromptTemplate`]

mod executor;
mod parser;
mod prompt;
mod step;
mod template;

pub use executor::{
    AgentExecutor, DEFAULT_MAX_ITERATIONS, DEFAULT_STOP_SEQUENCE, ExecutorConfig, RunConfig,
    RunReport,
};
pub use parser::{AgentOutputParser, FINAL_ANSWER_MARKER, OutputParser};
pub use prompt::{
    AgentPrompt, INPUT_VARIABLE, SCRATCHPAD_VARIABLE, TOOL_NAMES_VARIABLE, TOOLS_VARIABLE,
    default_template,
};
pub use step::{AgentAction, AgentFinish, AgentOutput, AgentStep, Scratchpad};
pub use template::{BasePromptTemplate, PromptTemplate, TemplateValues};
