//! CLI configuration management.
//!
//! This module defines the complete CLI configuration hierarchy:
//!
//! ```text
//! Cli
//! ├── provider: ProviderConfig         # Completion/embedding models and keys
//! ├── document: DocumentConfig         # Meeting minutes location
//! ├── rag: RagConfig                   # Chunking and retrieval
//! ├── agent: AgentConfig               # Task, trace flag, iteration limit
//! ├── lambda_client: LambdaClientConfig # HTTP timeout and user agent
//! └── email: EmailConfig               # Function URL, recipient, subject
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.

mod provider;

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Args, Parser};
use minutes_agent::agent::ExecutorConfig;
use minutes_lambda::EmailConfig;
use minutes_lambda::reqwest::LambdaClientConfig;
use minutes_rag::RagConfig;
pub use provider::{create_completion_provider, create_embedding_provider};
use serde::{Deserialize, Serialize};

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// The task the agent performs when none is given.
pub const DEFAULT_TASK: &str = "Find the action items agreed in the meeting minutes and who owns \
    each of them, then send one email to the team that lists every action item with its owner.";

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "minutes")]
#[command(about = "Runs the meeting-minutes task agent")]
#[command(version)]
pub struct Cli {
    /// Completion and embedding providers.
    #[clap(flatten)]
    pub provider: provider::ProviderConfig,

    /// Source document.
    #[clap(flatten)]
    pub document: DocumentConfig,

    /// Chunking and retrieval.
    #[clap(flatten)]
    pub rag: RagConfig,

    /// Agent loop.
    #[clap(flatten)]
    pub agent: AgentConfig,

    /// HTTP client for the email function.
    #[clap(flatten)]
    pub lambda_client: LambdaClientConfig,

    /// Email function target.
    #[clap(flatten)]
    pub email: EmailConfig,
}

/// Location of the meeting minutes.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Path to the meeting minutes text file
    #[arg(long, env = "MINUTES_PATH", default_value = "meeting_minutes.txt")]
    pub minutes_path: PathBuf,
}

/// Agent task and loop settings.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Task given to the agent
    #[arg(long, env = "AGENT_TASK", default_value = DEFAULT_TASK)]
    pub task: String,

    /// Log every model completion and tool observation at info level
    #[arg(long, env = "AGENT_TRACE")]
    pub trace: bool,

    #[clap(flatten)]
    pub executor: ExecutorConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded before clap parses arguments so that its
    /// values act as environment defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.provider
            .validate()
            .context("invalid provider configuration")?;
        anyhow::ensure!(
            !self.agent.task.trim().is_empty(),
            "the agent task must not be empty"
        );
        anyhow::ensure!(
            self.agent.executor.max_iterations > 0,
            "max iterations must be at least 1"
        );
        anyhow::ensure!(
            self.rag.chunk_overlap_characters.map_or(0, |o| o.get()) < self.rag.max_chunk_characters,
            "chunk overlap must be smaller than the chunk size"
        );
        Ok(())
    }

    /// Logs configuration (no sensitive information).
    pub fn log(&self) {
        Self::log_build_info();
        self.provider.log();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            minutes_path = %self.document.minutes_path.display(),
            max_chunk_characters = self.rag.max_chunk_characters,
            max_results = self.rag.max_results,
            "Retrieval configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            function_url = %self.email.function_url,
            recipient = ?self.email.recipient,
            timeout_secs = self.lambda_client.timeout_secs,
            "Email lambda configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            max_iterations = self.agent.executor.max_iterations,
            trace = self.agent.trace,
            "Agent configuration"
        );
    }

    /// Logs build information at debug level.
    fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    const REQUIRED: [&str; 5] = [
        "minutes",
        "--openai-api-key",
        "sk-test",
        "--email-lambda-url",
        "https://lambda.example.com/send",
    ];

    fn parse(extra: &[&str]) -> Cli {
        Cli::try_parse_from(REQUIRED.iter().chain(extra)).unwrap()
    }

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    /// Reads the declared default of an argument, ignoring the environment.
    fn declared_default(id: &str) -> String {
        let command = Cli::command();
        let arg = command
            .get_arguments()
            .find(|arg| arg.get_id() == id)
            .unwrap_or_else(|| panic!("no argument {id}"));
        arg.get_default_values()
            .iter()
            .map(|value| value.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn declared_defaults() {
        assert_eq!(declared_default("minutes_path"), "meeting_minutes.txt");
        assert_eq!(declared_default("task"), DEFAULT_TASK);
        assert_eq!(declared_default("max_iterations"), "15");
        assert_eq!(declared_default("max_chunk_characters"), "1000");
        assert_eq!(declared_default("completion_model"), "gpt-4o-mini");
        assert_eq!(declared_default("embedding_model"), "text-embedding-ada-002");
        assert_eq!(declared_default("temperature").parse::<f64>().unwrap(), 0.0);
    }

    #[test]
    fn library_defaults_match_flags() {
        let executor = ExecutorConfig::default();
        assert_eq!(executor.max_iterations, 15);
        assert_eq!(executor.stop, vec!["\nObservation:".to_string()]);

        let rag = RagConfig::default();
        assert_eq!(rag.max_chunk_characters, 1000);
        assert_eq!(rag.max_results, 4);
    }

    #[test]
    fn overrides() {
        let cli = parse(&[
            "--trace",
            "--task",
            "Email the budget owner",
            "--max-iterations",
            "4",
            "--email-recipient",
            "team@example.com",
        ]);

        assert!(cli.agent.trace);
        assert_eq!(cli.agent.task, "Email the budget owner");
        assert_eq!(cli.agent.executor.max_iterations, 4);
        assert_eq!(cli.email.recipient.as_deref(), Some("team@example.com"));
    }

    #[test]
    fn unknown_model_fails_validation() {
        let cli = parse(&["--completion-model", "gpt-2"]);
        assert!(cli.validate().is_err());
    }
}
