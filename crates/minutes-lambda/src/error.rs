//! Error types for lambda invocation.

/// Result type alias for lambda operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while invoking the cloud function.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The function answered with a non-2xx status.
    #[error("lambda returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The request timed out.
    #[error("lambda request timed out: {0}")]
    Timeout(String),

    /// The request could not be sent or the response could not be read.
    #[error("network error: {0}")]
    Network(String),

    /// The request could not be built, e.g. the payload failed to serialize.
    #[error("invalid request: {0}")]
    Request(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Creates a status error.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl std::fmt::Display) -> Self {
        Self::Config(message.to_string())
    }
}
