//! API client error types.

use crate::config::ConfigError;

/// Text shown to users when any API call fails.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Errors from dashboard API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The API returned a non-2xx status.
    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// The message to show the user. Deliberately undifferentiated; the
    /// detailed error belongs in the log.
    pub fn user_message(&self) -> &'static str {
        GENERIC_FAILURE_MESSAGE
    }

    /// HTTP status code, if the API answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
