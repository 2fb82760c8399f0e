//! Wiring of the fixed task: index the minutes, register tools, run the agent.

use std::sync::Arc;

use anyhow::Context;
use minutes_agent::agent::{AgentExecutor, RunConfig, RunReport};
use minutes_agent::tool::ToolRegistry;
use minutes_lambda::EmailLambdaTool;
use minutes_lambda::reqwest::LambdaClient;
use minutes_rag::embedding::Embedder;
use minutes_rag::search::InMemoryVectorStore;
use minutes_rag::{DocumentLoader, Indexer, RetrievalQa, RetrievalQaTool};

use crate::TRACING_TARGET_TASK;
use crate::config::{Cli, create_completion_provider, create_embedding_provider};

/// Runs the configured task end to end and returns the agent's report.
pub async fn run_task(cli: &Cli) -> anyhow::Result<RunReport> {
    let model = Arc::new(create_completion_provider(&cli.provider)?);
    let embedder: Arc<dyn Embedder> = Arc::new(create_embedding_provider(&cli.provider)?);

    let path = &cli.document.minutes_path;
    let document = DocumentLoader::new()
        .load(path)
        .await
        .with_context(|| format!("failed to load meeting minutes from {}", path.display()))?;

    let mut store = InMemoryVectorStore::new();
    let chunks = Indexer::new(embedder.clone(), &cli.rag)
        .context("invalid chunking configuration")?
        .index(&document, &mut store)
        .await
        .context("failed to index meeting minutes")?;

    tracing::info!(
        target: TRACING_TARGET_TASK,
        source = %document.source.display(),
        chunks,
        "meeting minutes indexed"
    );

    let qa = RetrievalQa::new(embedder, Arc::new(store), model.clone(), &cli.rag);
    let lambda = LambdaClient::new(cli.lambda_client.clone())
        .context("failed to create lambda client")?;

    let mut tools = ToolRegistry::new();
    tools.register(RetrievalQaTool::new(qa))?;
    tools.register(EmailLambdaTool::new(Arc::new(lambda), cli.email.clone()))?;

    let executor = AgentExecutor::new(model, tools, cli.agent.executor.clone());
    let run_config = RunConfig {
        trace: cli.agent.trace,
    };

    let report = executor
        .run(&cli.agent.task, &run_config)
        .await
        .context("agent run failed")?;

    tracing::info!(
        target: TRACING_TARGET_TASK,
        run_id = %report.run_id,
        iterations = report.iterations,
        steps = report.steps.len(),
        "task completed"
    );

    Ok(report)
}
