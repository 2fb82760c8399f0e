//! Reqwest-based HTTP client for lambda invocation.
//!
//! This module provides a reqwest-based implementation of the [`LambdaProvider`]
//! trait.
//!
//! [`LambdaProvider`]: crate::LambdaProvider

mod client;
mod config;
mod error;

pub use client::LambdaClient;
pub use config::{DEFAULT_TIMEOUT_SECS, LambdaClientConfig};

/// Tracing target for reqwest client operations.
pub const TRACING_TARGET: &str = "minutes_lambda::reqwest";
