//! Finished client configuration and the request loop run through it.

use crate::decoder::ErrorDecoder;
use crate::interceptor::RequestInterceptor;
use crate::logger::{self, LogLevel, Logger};
use crate::options::RequestOptions;
use crate::request::{Request, RequestTemplate, Response, UrlMode};
use crate::retry::Retryer;
use crate::transport::{AsyncHttpClient, HttpClient};
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Everything a produced API client needs besides its transport.
pub(crate) struct Target {
    pub(crate) base_url: String,
    pub(crate) url_mode: UrlMode,
    pub(crate) log_level: LogLevel,
    pub(crate) logger: Arc<dyn Logger>,
    pub(crate) retryer: Arc<dyn Retryer>,
    pub(crate) error_decoder: Arc<dyn ErrorDecoder>,
    pub(crate) options: RequestOptions,
    pub(crate) interceptors: Vec<Arc<dyn RequestInterceptor>>,
}

impl Target {
    fn prepare(&self, template: &RequestTemplate) -> Result<Request> {
        let mut template = template.clone();
        for interceptor in &self.interceptors {
            interceptor.apply(&mut template);
        }
        let request = template.resolve(&self.base_url, self.url_mode)?;
        logger::log_request(
            self.logger.as_ref(),
            self.log_level,
            template.method_key(),
            &request,
        );
        Ok(request)
    }

    fn complete(
        &self,
        method_key: &str,
        outcome: Result<Response>,
        elapsed: Duration,
    ) -> Result<Response> {
        let response = match outcome {
            Ok(response) => response,
            Err(error) => {
                logger::log_transport_error(
                    self.logger.as_ref(),
                    self.log_level,
                    method_key,
                    &error,
                    elapsed,
                );
                return Err(error);
            }
        };

        logger::log_response(
            self.logger.as_ref(),
            self.log_level,
            method_key,
            &response,
            elapsed,
        );
        if response.status.is_success() {
            Ok(response)
        } else {
            Err(self.error_decoder.decode(method_key, &response))
        }
    }

    fn next_delay(&self, method_key: &str, attempt: u32, error: &Error) -> Option<Duration> {
        let delay = self.retryer.backoff(attempt, error)?;
        logger::log_retry(self.logger.as_ref(), self.log_level, method_key, delay);
        Some(delay)
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("base_url", &self.base_url)
            .field("url_mode", &self.url_mode)
            .field("log_level", &self.log_level)
            .field("options", &self.options)
            .field("interceptors", &self.interceptors.len())
            .finish_non_exhaustive()
    }
}

/// Configuration plus a blocking transport. Cheap to clone.
#[derive(Clone)]
pub struct BlockingTarget {
    target: Arc<Target>,
    client: Arc<dyn HttpClient>,
}

impl BlockingTarget {
    pub(crate) fn new(target: Target, client: Arc<dyn HttpClient>) -> Self {
        Self {
            target: Arc::new(target),
            client,
        }
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        &self.target.base_url
    }

    /// How template paths combine with the base URL.
    pub fn url_mode(&self) -> UrlMode {
        self.target.url_mode
    }

    /// Send `template`, retrying as the retryer allows.
    ///
    /// Returns the successful response, or the decoded error of the last attempt.
    pub fn execute(&self, template: &RequestTemplate) -> Result<Response> {
        let method_key = template.method_key();
        let mut attempt = 0;
        loop {
            attempt += 1;
            let request = self.target.prepare(template)?;
            let started = Instant::now();
            let outcome = self.client.execute(request, &self.target.options);

            let error = match self.target.complete(method_key, outcome, started.elapsed()) {
                Ok(response) => return Ok(response),
                Err(error) => error,
            };
            match self.target.next_delay(method_key, attempt, &error) {
                Some(delay) => std::thread::sleep(delay),
                None => return Err(error),
            }
        }
    }

    /// Send `template` and decode the JSON body.
    pub fn execute_json<T: DeserializeOwned>(&self, template: &RequestTemplate) -> Result<T> {
        self.execute(template)?.json()
    }
}

impl fmt::Debug for BlockingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BlockingTarget").field(&self.target).finish()
    }
}

/// Configuration plus an async transport. Cheap to clone.
#[derive(Clone)]
pub struct AsyncTarget {
    target: Arc<Target>,
    client: Arc<dyn AsyncHttpClient>,
}

impl AsyncTarget {
    pub(crate) fn new(target: Target, client: Arc<dyn AsyncHttpClient>) -> Self {
        Self {
            target: Arc::new(target),
            client,
        }
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        &self.target.base_url
    }

    /// How template paths combine with the base URL.
    pub fn url_mode(&self) -> UrlMode {
        self.target.url_mode
    }

    /// Send `template`, retrying as the retryer allows.
    pub async fn execute(&self, template: &RequestTemplate) -> Result<Response> {
        let method_key = template.method_key();
        let mut attempt = 0;
        loop {
            attempt += 1;
            let request = self.target.prepare(template)?;
            let started = Instant::now();
            let outcome = self.client.execute(request, &self.target.options).await;

            let error = match self.target.complete(method_key, outcome, started.elapsed()) {
                Ok(response) => return Ok(response),
                Err(error) => error,
            };
            match self.target.next_delay(method_key, attempt, &error) {
                Some(delay) => tokio::time::sleep(delay).await,
                None => return Err(error),
            }
        }
    }

    /// Send `template` and decode the JSON body.
    pub async fn execute_json<T: DeserializeOwned>(&self, template: &RequestTemplate) -> Result<T> {
        self.execute(template).await?.json()
    }
}

impl fmt::Debug for AsyncTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AsyncTarget").field(&self.target).finish()
    }
}
