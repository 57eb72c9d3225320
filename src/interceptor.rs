//! Hooks that mutate a request template before it is sent.

use crate::request::RequestTemplate;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use std::fmt;

/// Username Mailgun expects for API-key basic authentication.
pub const API_USERNAME: &str = "api";

/// Invoked before every request attempt, in registration order.
///
/// Closures taking `&mut RequestTemplate` implement this trait:
///
/// ```
/// use mailgun_client::RequestTemplate;
/// use reqwest::header::{HeaderName, HeaderValue};
///
/// let interceptor = |template: &mut RequestTemplate| {
///     template.header(
///         HeaderName::from_static("custom-header"),
///         HeaderValue::from_static("CustomValue"),
///     );
/// };
/// # let _ = interceptor;
/// ```
pub trait RequestInterceptor: Send + Sync {
    fn apply(&self, template: &mut RequestTemplate);
}

impl<F> RequestInterceptor for F
where
    F: Fn(&mut RequestTemplate) + Send + Sync,
{
    fn apply(&self, template: &mut RequestTemplate) {
        self(template)
    }
}

/// Adds an `Authorization: Basic ...` header to every request.
#[derive(Clone)]
pub struct BasicAuthInterceptor {
    header: HeaderValue,
}

impl BasicAuthInterceptor {
    pub fn new(username: &str, password: &str) -> Self {
        let encoded = STANDARD.encode(format!("{username}:{password}"));
        // base64 output is always a valid header value
        let mut header = HeaderValue::from_str(&format!("Basic {encoded}"))
            .unwrap_or_else(|_| HeaderValue::from_static("Basic"));
        header.set_sensitive(true);
        Self { header }
    }

    /// Basic auth with Mailgun's fixed `api` username and `api_key` as password.
    pub fn for_api_key(api_key: &str) -> Self {
        Self::new(API_USERNAME, api_key)
    }
}

impl fmt::Debug for BasicAuthInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuthInterceptor")
            .field("header", &"<redacted>")
            .finish()
    }
}

impl RequestInterceptor for BasicAuthInterceptor {
    fn apply(&self, template: &mut RequestTemplate) {
        template.header(AUTHORIZATION, self.header.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;
    use reqwest::header::HeaderName;

    #[test]
    fn basic_auth_uses_api_username() {
        let mut template = RequestTemplate::new("Api#op", Method::GET, "v3/x");
        BasicAuthInterceptor::for_api_key("key-123").apply(&mut template);

        // base64("api:key-123")
        assert_eq!(template.headers()[AUTHORIZATION], "Basic YXBpOmtleS0xMjM=");
        assert!(template.headers()[AUTHORIZATION].is_sensitive());
    }

    #[test]
    fn debug_redacts_credentials() {
        let debug = format!("{:?}", BasicAuthInterceptor::for_api_key("key-123"));
        assert!(!debug.contains("YXBp"));
    }

    #[test]
    fn closures_are_interceptors() {
        let interceptor = |template: &mut RequestTemplate| {
            template.header(
                HeaderName::from_static("custom-header"),
                HeaderValue::from_static("CustomValue"),
            );
        };

        let mut template = RequestTemplate::new("Api#op", Method::GET, "v3/x");
        interceptor.apply(&mut template);
        assert_eq!(template.headers()["custom-header"], "CustomValue");
    }
}
