//! Conversion of non-success responses into errors.

use crate::Error;
use crate::request::Response;
use reqwest::header::RETRY_AFTER;
use serde::Deserialize;
use std::time::Duration;

/// Turns a non-2xx response into the error returned to the caller.
pub trait ErrorDecoder: Send + Sync {
    fn decode(&self, method_key: &str, response: &Response) -> Error;
}

/// Reads Mailgun's `{"message": "..."}` error body.
///
/// Responses carrying a numeric `Retry-After` header become
/// [`Error::Retryable`]; everything else becomes [`Error::Api`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultErrorDecoder;

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl ErrorDecoder for DefaultErrorDecoder {
    fn decode(&self, _method_key: &str, response: &Response) -> Error {
        let message = match response.json::<ErrorBody>() {
            Ok(body) => body.message,
            Err(_) => response.text(),
        };

        let retry_after = response
            .headers
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs);

        match retry_after {
            Some(delay) => Error::Retryable {
                status: response.status,
                message,
                retry_after: Some(delay),
            },
            None => Error::Api {
                status: response.status,
                message,
            },
        }
    }
}
