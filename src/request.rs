//! Request templates, resolved requests and raw responses.

use crate::Result;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

/// How a target turns its base URL and a template path into a request URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlMode {
    /// Base URL joined with the template's path.
    Templated,
    /// Base URL used verbatim; the template's path is ignored.
    Absolute,
}

/// A request before URL resolution, as seen by interceptors.
#[derive(Debug, Clone)]
pub struct RequestTemplate {
    method_key: String,
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
}

impl RequestTemplate {
    /// Create a template for `method` on `path`, relative to the base URL.
    ///
    /// `method_key` names the API operation in logs and error decoding,
    /// e.g. `"MailgunMessagesApi#send_message"`.
    pub fn new(method_key: impl Into<String>, method: Method, path: impl Into<String>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Self {
            method_key: method_key.into(),
            method,
            path: path.into(),
            query: Vec::new(),
            headers,
            body: None,
        }
    }

    /// Operation name used in logs and error decoding.
    pub fn method_key(&self) -> &str {
        &self.method_key
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path relative to the base URL.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Headers set so far.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Encoded body, if any.
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Set a header, replacing any previous value under the same name.
    pub fn header(&mut self, name: HeaderName, value: HeaderValue) -> &mut Self {
        self.headers.insert(name, value);
        self
    }

    /// Append a query parameter.
    pub fn query(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Use `pairs` as an `application/x-www-form-urlencoded` body.
    pub fn form<K, V>(&mut self, pairs: impl IntoIterator<Item = (K, V)>) -> &mut Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();
        self.headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        self.body = Some(encoded.into_bytes());
        self
    }

    /// Resolve against `base_url`, producing the request handed to a transport.
    pub fn resolve(&self, base_url: &str, mode: UrlMode) -> Result<Request> {
        let mut url = match mode {
            UrlMode::Templated => Url::parse(&join_path(base_url, &self.path))?,
            UrlMode::Absolute => Url::parse(base_url)?,
        };
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }

        Ok(Request {
            method: self.method.clone(),
            url,
            headers: self.headers.clone(),
            body: self.body.clone(),
        })
    }
}

fn join_path(base_url: &str, path: &str) -> String {
    if path.is_empty() {
        return base_url.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// A fully resolved HTTP request.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// A raw HTTP response returned by a transport.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Response {
    /// Assemble a response, e.g. from a custom transport.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Into::into)
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templated_url_joins_base_and_path() {
        let template = RequestTemplate::new("Api#op", Method::GET, "v3/example.com/messages");

        let request = template
            .resolve("https://api.mailgun.net/", UrlMode::Templated)
            .unwrap();
        assert_eq!(
            request.url.as_str(),
            "https://api.mailgun.net/v3/example.com/messages"
        );

        let request = template
            .resolve("http://127.0.0.1:8080", UrlMode::Templated)
            .unwrap();
        assert_eq!(
            request.url.as_str(),
            "http://127.0.0.1:8080/v3/example.com/messages"
        );
    }

    #[test]
    fn absolute_url_ignores_path_but_keeps_query() {
        let mut template = RequestTemplate::new("Api#op", Method::GET, "v3/ignored");
        template.query("limit", "10");

        let request = template
            .resolve(
                "https://storage-us-east4.api.mailgun.net/v3/domains/example.com/messages/abc",
                UrlMode::Absolute,
            )
            .unwrap();
        assert_eq!(
            request.url.as_str(),
            "https://storage-us-east4.api.mailgun.net/v3/domains/example.com/messages/abc?limit=10"
        );
    }

    #[test]
    fn malformed_base_url_surfaces_on_resolve() {
        let template = RequestTemplate::new("Api#op", Method::GET, "v3/x");
        assert!(matches!(
            template.resolve("not a url", UrlMode::Templated),
            Err(crate::Error::Url(_))
        ));
    }

    #[test]
    fn form_body_sets_content_type() {
        let mut template = RequestTemplate::new("Api#op", Method::POST, "v3/x");
        template.form([("to", "alice@example.com"), ("subject", "Hi there")]);

        assert_eq!(
            template.body().unwrap(),
            b"to=alice%40example.com&subject=Hi+there"
        );
        assert_eq!(
            template.headers()[CONTENT_TYPE],
            "application/x-www-form-urlencoded"
        );
        assert_eq!(template.headers()[ACCEPT], "application/json");
    }

    #[test]
    fn response_decoding() {
        let response = Response::new(
            StatusCode::OK,
            HeaderMap::new(),
            br#"{"message":"Queued. Thank you."}"#.to_vec(),
        );
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["message"], "Queued. Thank you.");
        assert_eq!(response.text(), r#"{"message":"Queued. Thank you."}"#);
    }
}
