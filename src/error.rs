//! Error types for Mailgun API operations.

use reqwest::StatusCode;
use std::time::Duration;

/// Errors produced while configuring or calling the Mailgun API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The transport failed before a response was received.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Mailgun answered with a non-success status.
    #[error("Mailgun API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    /// Mailgun answered with a non-success status and asked the caller to retry.
    #[error("Mailgun API error ({status}), retryable: {message}")]
    Retryable {
        status: StatusCode,
        message: String,
        retry_after: Option<Duration>,
    },

    /// The configured base URL or the endpoint path did not form a valid URL.
    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    /// The response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Json(#[from] serde_json::Error),

    /// Missing or malformed configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Error raised by a caller-supplied decoder or transport.
    #[error(transparent)]
    Custom(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Whether a retryer may try the request again.
    ///
    /// Any I/O failure while sending the request or reading the body is
    /// retryable (connect, timeout, reset), as is any response the error
    /// decoder classified as [`Error::Retryable`].
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Request(e) => {
                e.is_connect() || e.is_timeout() || e.is_request() || e.is_body()
            }
            Error::Retryable { .. } => true,
            _ => false,
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Request(e) => e.status(),
            Error::Api { status, .. } | Error::Retryable { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Delay requested by the server via `Retry-After`.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Error::Retryable { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        let api = Error::Api {
            status: StatusCode::BAD_REQUEST,
            message: "'from' parameter is missing".into(),
        };
        assert!(!api.is_retryable());
        assert_eq!(api.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(api.retry_after(), None);

        let retry = Error::Retryable {
            status: StatusCode::TOO_MANY_REQUESTS,
            message: "slow down".into(),
            retry_after: Some(Duration::from_secs(2)),
        };
        assert!(retry.is_retryable());
        assert_eq!(retry.retry_after(), Some(Duration::from_secs(2)));

        assert!(!Error::Config("MAILGUN_API_KEY is not set".into()).is_retryable());
    }

    #[test]
    fn display_includes_status_and_message() {
        let err = Error::Api {
            status: StatusCode::UNAUTHORIZED,
            message: "Forbidden".into(),
        };
        assert_eq!(err.to_string(), "Mailgun API error (401 Unauthorized): Forbidden");
    }
}
