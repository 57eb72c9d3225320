//! Mailgun client configuration and API client factories.

use crate::api::{MailgunApi, MailgunAsyncApi};
use crate::decoder::{DefaultErrorDecoder, ErrorDecoder};
use crate::interceptor::{BasicAuthInterceptor, RequestInterceptor};
use crate::logger::{LogLevel, Logger, TracingLogger};
use crate::options::{DEFAULT_BASE_URL_US_REGION, Region, RequestOptions};
use crate::request::UrlMode;
use crate::retry::{DefaultRetryer, Retryer};
use crate::target::{AsyncTarget, BlockingTarget, Target};
use crate::transport::{AsyncHttpClient, DefaultAsyncClient, DefaultClient, HttpClient};
use crate::{Error, Result};
use std::fmt;
use std::sync::Arc;

const API_KEY_VAR: &str = "MAILGUN_API_KEY";
const BASE_URL_VAR: &str = "MAILGUN_BASE_URL";
const REGION_VAR: &str = "MAILGUN_REGION";

/// Entry point for configuring Mailgun API clients.
///
/// Use [`MailgunClient::config`] for the US region defaults or
/// [`MailgunClient::config_with_base_url`] for another endpoint, then call one
/// of the `create_*` methods on the returned builder.
///
/// # Examples
/// ```no_run
/// use mailgun_client::{MailgunClient, MailgunMessagesApi, EU_REGION_BASE_URL};
///
/// let us: MailgunMessagesApi = MailgunClient::config("key-xxx").create_api();
/// let eu: MailgunMessagesApi =
///     MailgunClient::config_with_base_url(EU_REGION_BASE_URL, "key-xxx").create_api();
/// # let _ = (us, eu);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MailgunClient;

impl MailgunClient {
    /// Configure clients for the default US region endpoint.
    pub fn config(api_key: impl Into<String>) -> MailgunClientBuilder {
        MailgunClientBuilder::new(DEFAULT_BASE_URL_US_REGION, api_key)
    }

    /// Configure clients for `base_url`, taken verbatim.
    pub fn config_with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> MailgunClientBuilder {
        MailgunClientBuilder::new(base_url, api_key)
    }

    /// Configure clients for a region's endpoint.
    pub fn config_with_region(region: Region, api_key: impl Into<String>) -> MailgunClientBuilder {
        MailgunClientBuilder::new(region.base_url(), api_key)
    }

    /// Configure clients from the environment.
    ///
    /// Reads `MAILGUN_API_KEY` (required), then `MAILGUN_BASE_URL` or, failing
    /// that, `MAILGUN_REGION` (`us` or `eu`). Defaults to the US region.
    pub fn from_env() -> Result<MailgunClientBuilder> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<MailgunClientBuilder> {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::Config(format!("{API_KEY_VAR} is not set")))?;

        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|url| !url.is_empty()) {
            return Ok(Self::config_with_base_url(base_url, api_key));
        }
        let region = match lookup(REGION_VAR) {
            Some(region) => region.parse()?,
            None => Region::default(),
        };
        Ok(Self::config_with_region(region, api_key))
    }
}

/// Builder for Mailgun API clients.
///
/// Setters only record values; nothing is validated or connected until a
/// produced client sends its first request. The builder can produce any
/// number of clients.
#[derive(Clone)]
pub struct MailgunClientBuilder {
    base_url: String,
    api_key: String,
    log_level: LogLevel,
    logger: Arc<dyn Logger>,
    retryer: Arc<dyn Retryer>,
    error_decoder: Arc<dyn ErrorDecoder>,
    options: RequestOptions,
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
    client: Option<Arc<dyn HttpClient>>,
    async_client: Option<Arc<dyn AsyncHttpClient>>,
}

impl MailgunClientBuilder {
    /// Create a builder with default settings.
    ///
    /// Defaults:
    /// - `LogLevel::None`, logging through `tracing`
    /// - [`DefaultRetryer`] (100ms period, 1s max period, 5 attempts)
    /// - [`DefaultErrorDecoder`]
    /// - 10s connect timeout, 60s read timeout, redirects followed
    /// - `reqwest` transports
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            log_level: LogLevel::default(),
            logger: Arc::new(TracingLogger),
            retryer: Arc::new(DefaultRetryer::default()),
            error_decoder: Arc::new(DefaultErrorDecoder),
            options: RequestOptions::default(),
            interceptors: Vec::new(),
            client: None,
            async_client: None,
        }
    }

    /// Base URL the produced clients target.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set how much of each request and response is logged.
    pub fn log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }

    /// Override the retry policy.
    pub fn retryer(mut self, retryer: impl Retryer + 'static) -> Self {
        self.retryer = Arc::new(retryer);
        self
    }

    /// Override where log lines go.
    pub fn logger(mut self, logger: impl Logger + 'static) -> Self {
        self.logger = Arc::new(logger);
        self
    }

    /// Override how non-success responses become errors.
    pub fn error_decoder(mut self, error_decoder: impl ErrorDecoder + 'static) -> Self {
        self.error_decoder = Arc::new(error_decoder);
        self
    }

    /// Override timeouts and redirect handling.
    pub fn options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Append an interceptor applied to every client produced afterwards.
    pub fn request_interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    /// Use `client` as the transport of blocking API clients.
    pub fn client(mut self, client: impl HttpClient + 'static) -> Self {
        self.client = Some(Arc::new(client));
        self
    }

    /// Use `client` as the transport of async API clients.
    pub fn async_client(mut self, client: impl AsyncHttpClient + 'static) -> Self {
        self.async_client = Some(Arc::new(client));
        self
    }

    /// Create a blocking client whose endpoints are resolved against the base URL.
    pub fn create_api<T: MailgunApi>(&self) -> T {
        T::from_target(self.blocking_target(UrlMode::Templated, None))
    }

    /// Create a blocking client that sends every request to the base URL itself.
    pub fn create_api_with_absolute_url<T: MailgunApi>(&self) -> T {
        T::from_target(self.blocking_target(UrlMode::Absolute, None))
    }

    /// Like [`create_api`](Self::create_api), with `interceptor` run after the
    /// configured ones.
    ///
    /// # Examples
    /// ```no_run
    /// use mailgun_client::{MailgunClient, MailgunMessagesApi, RequestTemplate};
    /// use reqwest::header::{HeaderName, HeaderValue};
    ///
    /// let api: MailgunMessagesApi = MailgunClient::config("key-xxx")
    ///     .create_api_with_request_interceptor(|template: &mut RequestTemplate| {
    ///         template.header(
    ///             HeaderName::from_static("custom-header"),
    ///             HeaderValue::from_static("CustomValue"),
    ///         );
    ///     });
    /// # let _ = api;
    /// ```
    pub fn create_api_with_request_interceptor<T: MailgunApi>(
        &self,
        interceptor: impl RequestInterceptor + 'static,
    ) -> T {
        T::from_target(self.blocking_target(UrlMode::Templated, Some(Arc::new(interceptor))))
    }

    /// Create an async client whose endpoints are resolved against the base URL.
    pub fn create_async_api<T: MailgunAsyncApi>(&self) -> T {
        let client = match &self.async_client {
            Some(client) => Arc::clone(client),
            None => Arc::new(DefaultAsyncClient::new(self.options.clone())),
        };
        T::from_target(AsyncTarget::new(
            self.target(UrlMode::Templated, None),
            client,
        ))
    }

    fn blocking_target(
        &self,
        url_mode: UrlMode,
        extra: Option<Arc<dyn RequestInterceptor>>,
    ) -> BlockingTarget {
        let client = match &self.client {
            Some(client) => Arc::clone(client),
            None => Arc::new(DefaultClient::new(self.options.clone())),
        };
        BlockingTarget::new(self.target(url_mode, extra), client)
    }

    fn target(&self, url_mode: UrlMode, extra: Option<Arc<dyn RequestInterceptor>>) -> Target {
        let mut interceptors: Vec<Arc<dyn RequestInterceptor>> =
            vec![Arc::new(BasicAuthInterceptor::for_api_key(&self.api_key))];
        interceptors.extend(self.interceptors.iter().cloned());
        interceptors.extend(extra);

        Target {
            base_url: self.base_url.clone(),
            url_mode,
            log_level: self.log_level,
            logger: Arc::clone(&self.logger),
            retryer: Arc::clone(&self.retryer),
            error_decoder: Arc::clone(&self.error_decoder),
            options: self.options.clone(),
            interceptors,
        }
    }
}

impl fmt::Debug for MailgunClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailgunClientBuilder")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("log_level", &self.log_level)
            .field("options", &self.options)
            .field("interceptors", &self.interceptors.len())
            .field("custom_client", &self.client.is_some())
            .field("custom_async_client", &self.async_client.is_some())
            .finish_non_exhaustive()
    }
}
