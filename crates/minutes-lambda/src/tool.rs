//! The `send_email` agent tool.

use std::sync::Arc;

#[cfg(feature = "config")]
use clap::Args;
use minutes_agent::tool::Tool;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{LambdaPayload, LambdaProvider, LambdaRequest, TRACING_TARGET};

/// Name under which the email function is exposed to the agent.
pub const EMAIL_TOOL_NAME: &str = "send_email";

const EMAIL_TOOL_DESCRIPTION: &str = "Sends an email to the team. \
    Input should be the complete email body text.";

/// Observation reported when the function answers with an empty body.
const EMAIL_SENT_ACK: &str = "Email sent.";

/// Where and how emails are sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct EmailConfig {
    /// URL of the email-sending cloud function
    #[cfg_attr(feature = "config", arg(long = "email-lambda-url", env = "EMAIL_LAMBDA_URL"))]
    pub function_url: Url,

    /// Recipient address passed to the function
    #[cfg_attr(feature = "config", arg(long = "email-recipient", env = "EMAIL_RECIPIENT"))]
    #[serde(default)]
    pub recipient: Option<String>,

    /// Subject line passed to the function
    #[cfg_attr(feature = "config", arg(long = "email-subject", env = "EMAIL_SUBJECT"))]
    #[serde(default)]
    pub subject: Option<String>,
}

impl EmailConfig {
    /// Creates a configuration for the given function URL.
    pub fn new(function_url: Url) -> Self {
        Self {
            function_url,
            recipient: None,
            subject: None,
        }
    }

    /// Sets the recipient.
    pub fn with_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = Some(recipient.into());
        self
    }

    /// Sets the subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    fn payload(&self, body: &str) -> LambdaPayload {
        LambdaPayload {
            body: body.to_string(),
            recipient: self.recipient.clone(),
            subject: self.subject.clone(),
        }
    }
}

/// Sends the tool input as an email body through the cloud function.
pub struct EmailLambdaTool {
    provider: Arc<dyn LambdaProvider>,
    config: EmailConfig,
}

impl EmailLambdaTool {
    /// Creates the tool.
    pub fn new(provider: Arc<dyn LambdaProvider>, config: EmailConfig) -> Self {
        Self { provider, config }
    }
}

impl std::fmt::Debug for EmailLambdaTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailLambdaTool")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl Tool for EmailLambdaTool {
    fn name(&self) -> &str {
        EMAIL_TOOL_NAME
    }

    fn description(&self) -> &str {
        EMAIL_TOOL_DESCRIPTION
    }

    async fn call(&self, input: &str) -> minutes_agent::Result<String> {
        let request = LambdaRequest::new(self.config.function_url.clone(), self.config.payload(input));
        let response = self
            .provider
            .invoke(&request)
            .await
            .map_err(|e| minutes_agent::Error::tool(EMAIL_TOOL_NAME, e))?;

        tracing::info!(
            target: TRACING_TARGET,
            request_id = %request.request_id,
            status_code = response.status_code,
            "email lambda invoked"
        );

        let body = response.body.trim();
        if body.is_empty() {
            Ok(EMAIL_SENT_ACK.to_string())
        } else {
            Ok(body.to_string())
        }
    }
}
