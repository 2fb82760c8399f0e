//! Retrieval question answering and its agent tool.

use std::sync::Arc;

use minutes_agent::agent::{BasePromptTemplate, PromptTemplate, TemplateValues};
use minutes_agent::provider::ChatModel;
use minutes_agent::tool::Tool;
use serde::{Deserialize, Serialize};

use crate::embedding::Embedder;
use crate::search::{InMemoryVectorStore, RetrievedChunk};
use crate::{RagConfig, Result, TRACING_TARGET};

/// Name under which the QA chain is exposed to the agent.
pub const QA_TOOL_NAME: &str = "meeting_minutes_qa";

const QA_TOOL_DESCRIPTION: &str = "Useful for answering questions about the meeting minutes, \
    such as decisions, owners and action items. Input should be a fully formed question.";

const QA_PROMPT: &str = "\
Use the following pieces of context to answer the question at the end. \
If you don't know the answer, just say that you don't know, don't try to make up an answer.

{context}

Question: {question}
Helpful Answer:";

const CHUNK_SEPARATOR: &str = "\n\n";

/// An answer together with the chunks it was grounded on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaAnswer {
    /// The model's answer, trimmed.
    pub answer: String,
    /// Retrieved chunks in rank order.
    pub sources: Vec<RetrievedChunk>,
}

/// Answers questions by stuffing the closest chunks into one prompt.
pub struct RetrievalQa {
    embedder: Arc<dyn Embedder>,
    store: Arc<InMemoryVectorStore>,
    model: Arc<dyn ChatModel>,
    prompt: PromptTemplate,
    max_results: usize,
    min_score: Option<f64>,
}

impl RetrievalQa {
    /// Creates a QA chain over an indexed store.
    pub fn new(
        embedder: Arc<dyn Embedder>,
        store: Arc<InMemoryVectorStore>,
        model: Arc<dyn ChatModel>,
        config: &RagConfig,
    ) -> Self {
        Self {
            embedder,
            store,
            model,
            prompt: default_prompt(),
            max_results: config.max_results as usize,
            min_score: config.min_score,
        }
    }

    /// Replaces the QA prompt. It must reference `{context}` and `{question}`.
    pub fn with_prompt(mut self, prompt: PromptTemplate) -> Self {
        self.prompt = prompt;
        self
    }

    /// Answers one question.
    ///
    /// When nothing is retrieved the model is still asked, with an empty
    /// context.
    #[tracing::instrument(skip(self, question), fields(question_len = question.len()))]
    pub async fn answer(&self, question: &str) -> Result<QaAnswer> {
        let query = self.embedder.embed_text(question).await?;
        let sources = self.store.search(&query, self.max_results, self.min_score)?;

        let context = sources
            .iter()
            .map(|chunk| chunk.content.as_str())
            .collect::<Vec<_>>()
            .join(CHUNK_SEPARATOR);

        let values: TemplateValues<'_> = [
            ("context", context),
            ("question", question.to_string()),
        ]
        .into_iter()
        .collect();
        let prompt = self.prompt.format(&values)?;

        let answer = self.model.complete(&prompt).await?;
        tracing::debug!(
            target: TRACING_TARGET,
            sources = sources.len(),
            answer_len = answer.len(),
            "answered question"
        );

        Ok(QaAnswer {
            answer: answer.trim().to_string(),
            sources,
        })
    }
}

impl std::fmt::Debug for RetrievalQa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetrievalQa")
            .field("embedder", &self.embedder.model_name())
            .field("model", &self.model.model_name())
            .field("chunks", &self.store.len())
            .field("max_results", &self.max_results)
            .field("min_score", &self.min_score)
            .finish()
    }
}

fn default_prompt() -> PromptTemplate {
    PromptTemplate::new(QA_PROMPT).expect("QA prompt is a valid template")
}

/// Exposes a [`RetrievalQa`] chain as the `meeting_minutes_qa` agent tool.
#[derive(Debug)]
pub struct RetrievalQaTool {
    qa: RetrievalQa,
}

impl RetrievalQaTool {
    /// Wraps a QA chain.
    pub fn new(qa: RetrievalQa) -> Self {
        Self { qa }
    }
}

#[async_trait::async_trait]
impl Tool for RetrievalQaTool {
    fn name(&self) -> &str {
        QA_TOOL_NAME
    }

    fn description(&self) -> &str {
        QA_TOOL_DESCRIPTION
    }

    async fn call(&self, input: &str) -> minutes_agent::Result<String> {
        self.qa
            .answer(input)
            .await
            .map(|answer| answer.answer)
            .map_err(|e| minutes_agent::Error::tool(QA_TOOL_NAME, e))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::indexer::tests::{KeywordEmbedder, MINUTES};
    use crate::splitter::Splitter;
    use crate::{Document, Error, Indexer};

    /// Echoes a canned answer and keeps the prompts it was given.
    struct RecordingModel {
        answer: String,
        prompts: Mutex<Vec<String>>,
    }

    impl RecordingModel {
        fn new(answer: &str) -> Arc<Self> {
            Arc::new(Self {
                answer: answer.to_string(),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait::async_trait]
    impl ChatModel for RecordingModel {
        fn model_name(&self) -> &str {
            "recording"
        }

        async fn complete(&self, prompt: &str) -> minutes_agent::Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if self.answer.is_empty() {
                return Err(minutes_agent::Error::provider("recording", "unavailable"));
            }
            Ok(self.answer.clone())
        }
    }

    async fn indexed_store() -> Arc<InMemoryVectorStore> {
        let indexer = Indexer::with_splitter(
            KeywordEmbedder::new(96),
            Splitter::new(45, 0, true).unwrap(),
        );
        let mut store = InMemoryVectorStore::new();
        indexer
            .index(&Document::new("minutes.txt", MINUTES), &mut store)
            .await
            .unwrap();
        Arc::new(store)
    }

    fn config(max_results: u32) -> RagConfig {
        RagConfig {
            max_results,
            ..RagConfig::default()
        }
    }

    #[tokio::test]
    async fn stuffs_closest_chunks_into_prompt() {
        let model = RecordingModel::new("  Ben emails the vendor.  ");
        let qa = RetrievalQa::new(
            KeywordEmbedder::new(96),
            indexed_store().await,
            model.clone(),
            &config(1),
        );

        let answer = qa.answer("Who talks to the vendor?").await.unwrap();
        assert_eq!(answer.answer, "Ben emails the vendor.");
        assert_eq!(answer.sources.len(), 1);
        assert!(answer.sources[0].content.contains("Vendor"));

        let prompts = model.prompts.lock().unwrap();
        assert!(prompts[0].contains(&answer.sources[0].content));
        assert!(prompts[0].ends_with("Question: Who talks to the vendor?\nHelpful Answer:"));
        assert!(!prompts[0].contains("Launch plan"));
    }

    #[tokio::test]
    async fn empty_index_still_asks_model() {
        let model = RecordingModel::new("I don't know.");
        let qa = RetrievalQa::new(
            KeywordEmbedder::new(96),
            Arc::new(InMemoryVectorStore::new()),
            model.clone(),
            &config(4),
        );

        let answer = qa.answer("What was decided?").await.unwrap();
        assert!(answer.sources.is_empty());
        assert_eq!(answer.answer, "I don't know.");
        assert_eq!(model.prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn tool_returns_answer_text() {
        let qa = RetrievalQa::new(
            KeywordEmbedder::new(96),
            indexed_store().await,
            RecordingModel::new("May."),
            &config(2),
        );
        let tool = RetrievalQaTool::new(qa);

        assert_eq!(tool.name(), "meeting_minutes_qa");
        assert_eq!(tool.call("When is the launch?").await.unwrap(), "May.");
    }

    #[tokio::test]
    async fn tool_wraps_model_failures() {
        let qa = RetrievalQa::new(
            KeywordEmbedder::new(96),
            indexed_store().await,
            RecordingModel::new(""),
            &config(2),
        );
        let error = RetrievalQaTool::new(qa).call("anything").await.unwrap_err();

        assert!(matches!(
            error,
            minutes_agent::Error::Tool { tool, .. } if tool == "meeting_minutes_qa"
        ));
    }

    #[tokio::test]
    async fn model_errors_surface_as_agent_errors() {
        let qa = RetrievalQa::new(
            KeywordEmbedder::new(96),
            indexed_store().await,
            RecordingModel::new(""),
            &config(2),
        );
        assert!(matches!(qa.answer("x").await.unwrap_err(), Error::Agent(_)));
    }
}
