//! Reqwest-based HTTP client for lambda invocation.

use std::sync::Arc;

use jiff::Timestamp;
use reqwest::Client;

use super::{LambdaClientConfig, TRACING_TARGET};
use crate::{Error, LambdaProvider, LambdaRequest, LambdaResponse, Result};

/// Inner client that holds the HTTP client and configuration.
struct LambdaClientInner {
    http: Client,
    config: LambdaClientConfig,
}

/// Reqwest-based HTTP client that invokes cloud functions by URL.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone)]
pub struct LambdaClient {
    inner: Arc<LambdaClientInner>,
}

impl std::fmt::Debug for LambdaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LambdaClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl LambdaClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: LambdaClientConfig) -> Result<Self> {
        let timeout = config.timeout();
        let connect_timeout = config.connect_timeout();

        tracing::debug!(
            target: TRACING_TARGET,
            timeout_ms = timeout.as_millis(),
            connect_timeout_ms = connect_timeout.as_millis(),
            "Creating lambda client"
        );

        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .user_agent(config.user_agent())
            .build()
            .map_err(|e| Error::config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            inner: Arc::new(LambdaClientInner { http, config }),
        })
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &LambdaClientConfig {
        &self.inner.config
    }
}

#[async_trait::async_trait]
impl LambdaProvider for LambdaClient {
    async fn invoke(&self, request: &LambdaRequest) -> Result<LambdaResponse> {
        let started_at = Timestamp::now();

        tracing::debug!(
            target: TRACING_TARGET,
            request_id = %request.request_id,
            url = %request.url,
            "Invoking lambda"
        );

        let mut http_request = self
            .inner
            .http
            .post(request.url.as_str())
            .header("X-Request-Id", request.request_id.to_string())
            .json(&request.payload);

        if let Some(timeout) = request.timeout {
            http_request = http_request.timeout(timeout);
        }

        let http_response = http_request.send().await?;
        let status_code = http_response.status().as_u16();
        let body = http_response.text().await?;

        let response = LambdaResponse::new(request.request_id, status_code, body, started_at);

        tracing::debug!(
            target: TRACING_TARGET,
            request_id = %request.request_id,
            status_code,
            success = response.is_success(),
            elapsed_ms = response.duration().as_millis(),
            "Lambda invocation completed"
        );

        if !response.is_success() {
            return Err(Error::status(status_code, response.body));
        }
        Ok(response)
    }
}
