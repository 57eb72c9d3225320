//! # Mailgun Client
//! Configurable wrapper around the Mailgun email-sending HTTP API. A single builder,
//! [`MailgunClient`] / [`MailgunClientBuilder`], records endpoint, credentials, logging,
//! retry policy, error decoding, timeouts, interceptors and transport, then produces typed
//! API clients such as [`MailgunMessagesApi`].
//!
//! ## Blocking and async
//! [`MailgunClientBuilder::create_api`] produces blocking clients backed by
//! `reqwest::blocking`; [`MailgunClientBuilder::create_async_api`] produces async clients
//! backed by `reqwest` that must run inside a Tokio (v1) runtime. Either transport can be
//! replaced through [`HttpClient`] or [`AsyncHttpClient`].
//!
//! ## Regions
//! [`MailgunClient::config`] targets the US endpoint ([`DEFAULT_BASE_URL_US_REGION`]). Pass
//! [`EU_REGION_BASE_URL`] or any other URL to [`MailgunClient::config_with_base_url`].
//! Credentials are sent as HTTP Basic auth with the `api` username.
//!
//! ## Errors
//! Transport failures surface as [`Error::Request`]; non-2xx responses are turned into
//! [`Error::Api`] or [`Error::Retryable`] by the configured [`ErrorDecoder`]. Nothing is
//! validated at configuration time: a malformed base URL becomes [`Error::Url`] on the
//! first request. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Logging
//! Request logging is off by default. Raise it with [`MailgunClientBuilder::log_level`];
//! lines go to `tracing` under the `mailgun_client` target unless another [`Logger`] is set.
//!
//! ## Example
//! ```no_run
//! use mailgun_client::{LogLevel, MailgunClient, MailgunMessagesApi, Message};
//!
//! fn main() -> Result<(), mailgun_client::Error> {
//!     let api: MailgunMessagesApi = MailgunClient::config("key-xxx")
//!         .log_level(LogLevel::Basic)
//!         .create_api();
//!
//!     let message = Message::builder()
//!         .from("Excited User <mailgun@example.com>")
//!         .to(vec!["alice@example.com".to_string()])
//!         .subject("Hello")
//!         .text("Testing some Mailgun awesomeness!")
//!         .build();
//!
//!     let response = api.send_message("example.com", &message)?;
//!     println!("Queued: {}", response.id);
//!     Ok(())
//! }
//! ```

mod api;
mod client;
mod decoder;
mod error;
mod interceptor;
mod logger;
mod models;
mod options;
mod request;
mod retry;
mod target;
mod transport;

pub use api::{
    MailgunApi, MailgunAsyncApi, MailgunMessagesApi, MailgunMessagesAsyncApi,
    MailgunStoredMessagesApi, MailgunStoredMessagesAsyncApi,
};
pub use client::{MailgunClient, MailgunClientBuilder};
pub use decoder::{DefaultErrorDecoder, ErrorDecoder};
pub use error::Error;
pub use interceptor::{API_USERNAME, BasicAuthInterceptor, RequestInterceptor};
pub use logger::{LogLevel, Logger, NoOpLogger, TracingLogger};
pub use models::{Message, MessageResponse, StoredAttachment, StoredMessage};
pub use options::{DEFAULT_BASE_URL_US_REGION, EU_REGION_BASE_URL, Region, RequestOptions};
pub use request::{Request, RequestTemplate, Response, UrlMode};
pub use retry::{DefaultRetryer, NeverRetry, Retryer};
pub use target::{AsyncTarget, BlockingTarget};
pub use transport::{
    AsyncHttpClient, DefaultAsyncClient, DefaultClient, ExecutorAsyncClient, HttpClient,
};

/// Result type alias for Mailgun operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
