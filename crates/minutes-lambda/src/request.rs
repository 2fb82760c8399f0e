//! Lambda invocation request types.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// JSON body sent to the email function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LambdaPayload {
    /// Email body text.
    pub body: String,

    /// Recipient address; the function's default is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,

    /// Subject line; the function's default is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl LambdaPayload {
    /// Creates a payload with only a body.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
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
}

/// A single invocation of a cloud function.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LambdaRequest {
    /// Identifier used to correlate logs and the response.
    pub request_id: Uuid,
    /// Function URL.
    pub url: Url,
    /// JSON payload.
    pub payload: LambdaPayload,
    /// Per-request timeout overriding the client default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
}

impl LambdaRequest {
    /// Creates a request with a fresh request ID.
    pub fn new(url: Url, payload: LambdaPayload) -> Self {
        Self {
            request_id: Uuid::now_v7(),
            url,
            payload,
            timeout: None,
        }
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_are_omitted() {
        let payload = LambdaPayload::new("Notes attached.");
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json, serde_json::json!({ "body": "Notes attached." }));
    }

    #[test]
    fn full_payload_shape() {
        let payload = LambdaPayload::new("Hi")
            .with_recipient("team@example.com")
            .with_subject("Minutes");
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "body": "Hi",
                "recipient": "team@example.com",
                "subject": "Minutes",
            })
        );
    }
}
