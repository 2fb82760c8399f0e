//! Agent executor that runs the tool-use loop.

use std::sync::Arc;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use tracing::Instrument;
use uuid::Uuid;

use super::parser::{AgentOutputParser, OutputParser};
use super::prompt::AgentPrompt;
use super::step::{AgentFinish, AgentOutput, AgentStep, Scratchpad};
use crate::provider::ChatModel;
use crate::tool::ToolRegistry;
use crate::{Error, Result, TRACING_TARGET};

/// Default maximum number of model calls per run.
pub const DEFAULT_MAX_ITERATIONS: usize = 15;

/// Default stop sequence; the model must not write observations itself.
pub const DEFAULT_STOP_SEQUENCE: &str = "\nObservation:";

/// Configuration for the agent loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct ExecutorConfig {
    /// Maximum number of model calls before the run is aborted.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "AGENT_MAX_ITERATIONS", default_value_t = DEFAULT_MAX_ITERATIONS)
    )]
    pub max_iterations: usize,

    /// Sequences at which the raw completion is cut before parsing.
    #[cfg_attr(
        feature = "config",
        arg(skip = vec![DEFAULT_STOP_SEQUENCE.to_string()])
    )]
    pub stop: Vec<String>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            stop: vec![DEFAULT_STOP_SEQUENCE.to_string()],
        }
    }
}

impl ExecutorConfig {
    /// Sets the iteration limit.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Replaces the stop sequences.
    pub fn with_stop<I, S>(mut self, stop: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop = stop.into_iter().map(Into::into).collect();
        self
    }
}

/// Per-run options.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RunConfig {
    /// Log every model completion and tool observation at `info` level.
    pub trace: bool,
}

impl RunConfig {
    /// Creates a run configuration with tracing enabled.
    pub fn traced() -> Self {
        Self { trace: true }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Identifier of the run, also recorded on its tracing span.
    pub run_id: Uuid,
    /// The final answer.
    pub finish: AgentFinish,
    /// Steps taken before the final answer, in order.
    pub steps: Vec<AgentStep>,
    /// Number of model calls made.
    pub iterations: usize,
}

impl RunReport {
    /// Returns the task summary.
    pub fn summary(&self) -> &str {
        &self.finish.summary
    }
}

/// Executor for running the agent loop.
///
/// The executor owns the tools and the model; every call to [`run`](Self::run)
/// starts from an empty scratchpad.
pub struct AgentExecutor {
    model: Arc<dyn ChatModel>,
    tools: ToolRegistry,
    prompt: AgentPrompt,
    parser: AgentOutputParser,
    config: ExecutorConfig,
}

impl AgentExecutor {
    /// Creates a new executor with the default prompt.
    pub fn new(model: Arc<dyn ChatModel>, tools: ToolRegistry, config: ExecutorConfig) -> Self {
        Self {
            model,
            tools,
            prompt: AgentPrompt::new(),
            parser: AgentOutputParser::new(),
            config,
        }
    }

    /// Replaces the prompt.
    pub fn with_prompt(mut self, prompt: AgentPrompt) -> Self {
        self.prompt = prompt;
        self
    }

    /// Returns the registered tools.
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Returns the executor configuration.
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Runs the agent on a task until the model reports a task summary.
    ///
    /// Any model, parse or tool failure aborts the run.
    pub async fn run(&self, input: &str, run_config: &RunConfig) -> Result<RunReport> {
        let run_id = Uuid::now_v7();
        let span = tracing::info_span!(
            target: TRACING_TARGET,
            "agent_run",
            %run_id,
            model = self.model.model_name(),
            tools = self.tools.len(),
        );

        self.run_loop(run_id, input, run_config).instrument(span).await
    }

    async fn run_loop(
        &self,
        run_id: Uuid,
        input: &str,
        run_config: &RunConfig,
    ) -> Result<RunReport> {
        let mut scratchpad = Scratchpad::new();

        for iteration in 1..=self.config.max_iterations {
            let prompt = self.prompt.format(&self.tools, input, scratchpad.steps())?;
            let completion = self.model.complete(&prompt).await?;
            let completion = truncate_at_stop(&completion, &self.config.stop);

            if run_config.trace {
                tracing::info!(target: TRACING_TARGET, iteration, completion = %completion, "model output");
            } else {
                tracing::debug!(target: TRACING_TARGET, iteration, completion = %completion, "model output");
            }

            match self.parser.parse(completion)? {
                AgentOutput::FinalAnswer(finish) => {
                    tracing::info!(
                        target: TRACING_TARGET,
                        iteration,
                        steps = scratchpad.len(),
                        "agent finished"
                    );
                    return Ok(RunReport {
                        run_id,
                        finish,
                        steps: scratchpad.into_steps(),
                        iterations: iteration,
                    });
                }
                AgentOutput::ToolCall(action) => {
                    let tool = self
                        .tools
                        .get(&action.tool)
                        .ok_or_else(|| Error::unknown_tool(&action.tool))?;

                    let observation = tool.call(&action.tool_input).await?;

                    if run_config.trace {
                        tracing::info!(
                            target: TRACING_TARGET,
                            iteration,
                            tool = %action.tool,
                            input = %action.tool_input,
                            observation = %observation,
                            "tool observation"
                        );
                    } else {
                        tracing::debug!(
                            target: TRACING_TARGET,
                            iteration,
                            tool = %action.tool,
                            "tool observation"
                        );
                    }

                    scratchpad.push(AgentStep::new(action, observation));
                }
            }
        }

        tracing::warn!(
            target: TRACING_TARGET,
            max_iterations = self.config.max_iterations,
            "agent stopped without a task summary"
        );
        Err(Error::IterationLimit {
            max_iterations: self.config.max_iterations,
        })
    }
}

impl std::fmt::Debug for AgentExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentExecutor")
            .field("model", &self.model.model_name())
            .field("tools", &self.tools)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Cuts the completion at the earliest occurrence of any stop sequence.
fn truncate_at_stop<'a>(completion: &'a str, stop: &[String]) -> &'a str {
    stop.iter()
        .filter(|sequence| !sequence.is_empty())
        .filter_map(|sequence| completion.find(sequence.as_str()))
        .min()
        .map_or(completion, |index| &completion[..index])
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use futures::FutureExt;

    use super::*;
    use crate::tool::FnTool;

    /// Replays canned completions and records every prompt it receives.
    struct ScriptedModel {
        completions: Mutex<VecDeque<String>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        fn new(completions: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                completions: Mutex::new(completions.iter().map(|c| c.to_string()).collect()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl ChatModel for ScriptedModel {
        fn model_name(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.completions
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| Error::provider("scripted", "script exhausted"))
        }
    }

    fn tools() -> ToolRegistry {
        let mut tools = ToolRegistry::new();
        tools
            .register(FnTool::new(
                "meeting_minutes_qa",
                "Answers questions about the meeting minutes",
                |input: String| async move { Ok(format!("answer to {input}")) }.boxed(),
            ))
            .unwrap();
        tools
            .register(FnTool::new(
                "send_email",
                "Sends an email",
                |_input: String| async move { Err(Error::tool("send_email", "503")) }.boxed(),
            ))
            .unwrap();
        tools
    }

    fn executor(model: Arc<ScriptedModel>, config: ExecutorConfig) -> AgentExecutor {
        AgentExecutor::new(model, tools(), config)
    }

    #[test]
    fn truncate_uses_earliest_stop_sequence() {
        let stop = vec!["\nObservation:".to_string(), "\nEND".to_string()];
        assert_eq!(truncate_at_stop("a\nEND b\nObservation: c", &stop), "a");
        assert_eq!(truncate_at_stop("a\nObservation: c\nEND", &stop), "a");
        assert_eq!(truncate_at_stop("nothing here", &stop), "nothing here");
        assert_eq!(truncate_at_stop("keep", &[String::new()]), "keep");
    }

    #[tokio::test]
    async fn runs_tool_then_finishes() {
        let model = ScriptedModel::new(&[
            " I should check the minutes.\nAction: meeting_minutes_qa\nAction Input: \"who owns QA?\"",
            " I know the owner.\nTask Summary: Dana owns QA.",
        ]);
        let report = executor(model.clone(), ExecutorConfig::default())
            .run("find the QA owner", &RunConfig::traced())
            .await
            .unwrap();

        assert_eq!(report.summary(), "Dana owns QA.");
        assert_eq!(report.iterations, 2);
        assert_eq!(report.steps.len(), 1);
        assert_eq!(report.steps[0].observation, "answer to who owns QA?");

        let prompts = model.prompts();
        assert!(prompts[0].ends_with("Task: find the QA owner\n"));
        assert!(prompts[1].ends_with(
            "Action Input: \"who owns QA?\"\nObservation: answer to who owns QA?\nThought:"
        ));
    }

    #[tokio::test]
    async fn stop_sequence_truncates_before_parsing() {
        let model = ScriptedModel::new(&[
            "Action: meeting_minutes_qa\nAction Input: budget\nObservation: made up\nTask Summary: hallucinated",
            "Task Summary: real",
        ]);
        let report = executor(model, ExecutorConfig::default())
            .run("task", &RunConfig::default())
            .await
            .unwrap();

        assert_eq!(report.summary(), "real");
        assert_eq!(report.steps[0].action.tool_input, "budget");
        assert_eq!(report.steps[0].observation, "answer to budget");
    }

    #[tokio::test]
    async fn unknown_tool_aborts() {
        let model = ScriptedModel::new(&["Action: Meeting_Minutes_QA\nAction Input: x"]);
        let error = executor(model, ExecutorConfig::default())
            .run("task", &RunConfig::default())
            .await
            .unwrap_err();

        assert!(matches!(error, Error::UnknownTool { tool } if tool == "Meeting_Minutes_QA"));
    }

    #[tokio::test]
    async fn parse_error_aborts() {
        let model = ScriptedModel::new(&["I refuse to follow the format."]);
        let error = executor(model.clone(), ExecutorConfig::default())
            .run("task", &RunConfig::default())
            .await
            .unwrap_err();

        assert!(matches!(error, Error::Parse { text } if text == "I refuse to follow the format."));
        assert_eq!(model.prompts().len(), 1);
    }

    #[tokio::test]
    async fn tool_error_propagates() {
        let model = ScriptedModel::new(&["Action: send_email\nAction Input: hello"]);
        let error = executor(model, ExecutorConfig::default())
            .run("task", &RunConfig::default())
            .await
            .unwrap_err();

        assert!(matches!(error, Error::Tool { tool, message } if tool == "send_email" && message == "503"));
    }

    #[tokio::test]
    async fn iteration_limit_is_enforced() {
        let looping = "Action: meeting_minutes_qa\nAction Input: again";
        let model = ScriptedModel::new(&[looping, looping, looping, looping]);
        let config = ExecutorConfig::default().with_max_iterations(3);
        let error = executor(model.clone(), config)
            .run("task", &RunConfig::default())
            .await
            .unwrap_err();

        assert!(matches!(error, Error::IterationLimit { max_iterations: 3 }));
        assert_eq!(model.prompts().len(), 3);
    }

    #[tokio::test]
    async fn scratchpad_resets_between_runs() {
        let model = ScriptedModel::new(&[
            "Action: meeting_minutes_qa\nAction Input: first",
            "Task Summary: one",
            "Task Summary: two",
        ]);
        let executor = executor(model.clone(), ExecutorConfig::default());

        let first = executor.run("first task", &RunConfig::default()).await.unwrap();
        let second = executor.run("second task", &RunConfig::default()).await.unwrap();

        assert_eq!(first.steps.len(), 1);
        assert!(second.steps.is_empty());
        assert_ne!(first.run_id, second.run_id);

        let prompts = model.prompts();
        assert!(prompts[2].ends_with("Task: second task\n"));
        assert!(!prompts[2].contains("answer to first"));
    }
}
