//! Mapping of reqwest failures onto lambda errors.

use crate::Error;

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout(err.to_string())
        } else if err.is_builder() {
            Error::Request(err.to_string())
        } else if err.is_connect() {
            Error::Network(format!("connection failed: {err}"))
        } else {
            Error::Network(err.to_string())
        }
    }
}
