#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
mod tool;

pub mod request;
pub mod response;

#[cfg(feature = "reqwest")]
#[cfg_attr(docsrs, doc(cfg(feature = "reqwest")))]
pub mod reqwest;

pub use error::{Error, Result};
pub use request::{LambdaPayload, LambdaRequest};
pub use response::LambdaResponse;
pub use tool::{EMAIL_TOOL_NAME, EmailConfig, EmailLambdaTool};

/// Tracing target for lambda operations.
pub const TRACING_TARGET: &str = "minutes_lambda";

/// Core trait for invoking a cloud function.
///
/// Implement this trait to plug in another transport.
#[async_trait::async_trait]
pub trait LambdaProvider: Send + Sync {
    /// Invokes the function and returns its response.
    ///
    /// Non-2xx responses are reported as [`Error::Status`].
    async fn invoke(&self, request: &LambdaRequest) -> Result<LambdaResponse>;
}
