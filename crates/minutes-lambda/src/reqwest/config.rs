//! HTTP settings for invoking function URLs.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Default end-to-end timeout, long enough to cover a function cold start.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default TCP/TLS connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// HTTP settings used by [`LambdaClient`](super::LambdaClient).
///
/// A function URL answers only after the function body has run, so the
/// request timeout bounds the whole invocation while the connect timeout
/// only bounds reaching the endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct LambdaClientConfig {
    /// Invocation timeout in seconds, including function execution
    #[cfg_attr(
        feature = "config",
        arg(long = "lambda-timeout", env = "LAMBDA_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)
    )]
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    #[cfg_attr(
        feature = "config",
        arg(
            long = "lambda-connect-timeout",
            env = "LAMBDA_CONNECT_TIMEOUT",
            default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS
        )
    )]
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// User-Agent sent to the function endpoint
    #[cfg_attr(
        feature = "config",
        arg(long = "lambda-user-agent", env = "LAMBDA_USER_AGENT")
    )]
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

impl Default for LambdaClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl LambdaClientConfig {
    /// Invocation timeout; zero selects the default.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(non_zero_or(self.timeout_secs, DEFAULT_TIMEOUT_SECS))
    }

    /// Connect timeout, never longer than the invocation timeout.
    pub fn connect_timeout(&self) -> Duration {
        let connect = Duration::from_secs(non_zero_or(
            self.connect_timeout_secs,
            DEFAULT_CONNECT_TIMEOUT_SECS,
        ));
        connect.min(self.timeout())
    }

    /// User agent, `minutes/<version>` when unset.
    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("minutes/{}", env!("CARGO_PKG_VERSION")))
    }

    /// Sets the invocation timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Sets the connect timeout in seconds.
    #[must_use]
    pub fn with_connect_timeout(mut self, connect_timeout_secs: u64) -> Self {
        self.connect_timeout_secs = connect_timeout_secs;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

fn non_zero_or(value: u64, default: u64) -> u64 {
    if value == 0 { default } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_timeouts_fall_back_to_defaults() {
        let config = LambdaClientConfig::default()
            .with_timeout(0)
            .with_connect_timeout(0);

        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(
            config.connect_timeout(),
            Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)
        );
    }

    #[test]
    fn connect_timeout_is_capped_by_invocation_timeout() {
        let config = LambdaClientConfig::default()
            .with_timeout(2)
            .with_connect_timeout(10);

        assert_eq!(config.timeout(), Duration::from_secs(2));
        assert_eq!(config.connect_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn user_agent_defaults_to_crate_version() {
        assert!(LambdaClientConfig::default().user_agent().starts_with("minutes/"));
        assert_eq!(
            LambdaClientConfig::default()
                .with_user_agent("agent/1.0")
                .user_agent(),
            "agent/1.0"
        );
    }
}
