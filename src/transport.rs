//! Pluggable HTTP transports, blocking and async.
//!
//! [`DefaultClient`] and [`DefaultAsyncClient`] wrap `reqwest`. Both build their
//! underlying client lazily on first use, so constructing them never fails and
//! a bad TLS setup surfaces as an error from the first request.

use crate::options::RequestOptions;
use crate::request::{Request, Response};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::redirect::Policy;
use std::sync::{Arc, OnceLock};
use tokio::runtime::Handle;

/// Sends a request and blocks until the response arrives.
pub trait HttpClient: Send + Sync {
    /// Send `request`, honoring `options` where the transport supports them.
    fn execute(&self, request: Request, options: &RequestOptions) -> Result<Response>;
}

/// Sends a request without blocking the calling task.
#[async_trait]
pub trait AsyncHttpClient: Send + Sync {
    /// Send `request`, honoring `options` where the transport supports them.
    async fn execute(&self, request: Request, options: &RequestOptions) -> Result<Response>;
}

fn redirect_policy(options: &RequestOptions) -> Policy {
    if options.follow_redirects() {
        Policy::default()
    } else {
        Policy::none()
    }
}

/// Blocking transport backed by `reqwest::blocking`.
///
/// Connect timeout and redirect policy are fixed when the inner client is
/// built; the read timeout is applied per request.
///
/// Like any `reqwest::blocking` client, it must not be used or dropped from
/// inside an async context.
#[derive(Debug, Default)]
pub struct DefaultClient {
    options: RequestOptions,
    http: OnceLock<reqwest::blocking::Client>,
}

impl DefaultClient {
    /// Transport whose inner client is built from `options` on first use.
    pub fn new(options: RequestOptions) -> Self {
        Self {
            options,
            http: OnceLock::new(),
        }
    }

    fn http(&self) -> Result<&reqwest::blocking::Client> {
        if let Some(http) = self.http.get() {
            return Ok(http);
        }
        let built = reqwest::blocking::Client::builder()
            .connect_timeout(self.options.connect_timeout())
            .redirect(redirect_policy(&self.options))
            .build()?;
        Ok(self.http.get_or_init(|| built))
    }
}

impl HttpClient for DefaultClient {
    fn execute(&self, request: Request, options: &RequestOptions) -> Result<Response> {
        let mut builder = self
            .http()?
            .request(request.method, request.url)
            .headers(request.headers)
            .timeout(options.read_timeout());
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send()?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes()?.to_vec();
        Ok(Response::new(status, headers, body))
    }
}

/// Async transport backed by `reqwest::Client`.
#[derive(Debug, Default)]
pub struct DefaultAsyncClient {
    options: RequestOptions,
    http: OnceLock<reqwest::Client>,
}

impl DefaultAsyncClient {
    /// Transport whose inner client is built from `options` on first use.
    pub fn new(options: RequestOptions) -> Self {
        Self {
            options,
            http: OnceLock::new(),
        }
    }

    fn http(&self) -> Result<&reqwest::Client> {
        if let Some(http) = self.http.get() {
            return Ok(http);
        }
        let built = reqwest::Client::builder()
            .connect_timeout(self.options.connect_timeout())
            .redirect(redirect_policy(&self.options))
            .build()?;
        Ok(self.http.get_or_init(|| built))
    }
}

#[async_trait]
impl AsyncHttpClient for DefaultAsyncClient {
    async fn execute(&self, request: Request, options: &RequestOptions) -> Result<Response> {
        let mut builder = self
            .http()?
            .request(request.method, request.url)
            .headers(request.headers)
            .timeout(options.read_timeout());
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();
        Ok(Response::new(status, headers, body))
    }
}

/// Async transport that runs a blocking [`HttpClient`] on a runtime's
/// blocking thread pool.
pub struct ExecutorAsyncClient<C> {
    client: Arc<C>,
    handle: Handle,
}

impl<C: HttpClient + 'static> ExecutorAsyncClient<C> {
    /// Run `client` on `handle`'s blocking pool.
    pub fn new(client: C, handle: Handle) -> Self {
        Self {
            client: Arc::new(client),
            handle,
        }
    }
}

#[async_trait]
impl<C: HttpClient + 'static> AsyncHttpClient for ExecutorAsyncClient<C> {
    async fn execute(&self, request: Request, options: &RequestOptions) -> Result<Response> {
        let client = Arc::clone(&self.client);
        let options = options.clone();
        self.handle
            .spawn_blocking(move || client.execute(request, &options))
            .await
            .map_err(|e| Error::Custom(Box::new(e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderMap;
    use reqwest::{Method, StatusCode};

    struct EchoClient;

    impl HttpClient for EchoClient {
        fn execute(&self, request: Request, _options: &RequestOptions) -> Result<Response> {
            Ok(Response::new(
                StatusCode::OK,
                HeaderMap::new(),
                request.url.as_str().as_bytes().to_vec(),
            ))
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn executor_client_runs_blocking_client() {
        let client = ExecutorAsyncClient::new(EchoClient, Handle::current());
        let request = Request {
            method: Method::GET,
            url: "https://api.mailgun.net/v3/domains".parse().unwrap(),
            headers: HeaderMap::new(),
            body: None,
        };

        let response = client
            .execute(request, &RequestOptions::default())
            .await
            .unwrap();
        assert_eq!(response.text(), "https://api.mailgun.net/v3/domains");
    }

    #[test]
    fn default_clients_build_lazily() {
        let client = DefaultClient::new(RequestOptions::default());
        assert!(client.http.get().is_none());

        let client = DefaultAsyncClient::default();
        assert!(client.http.get().is_none());
    }
}
