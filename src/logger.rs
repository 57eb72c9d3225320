//! Request/response logging at a configurable verbosity.

use crate::Error;
use crate::request::{Request, Response};
use reqwest::header::{AUTHORIZATION, HeaderMap};
use std::time::Duration;

/// How much of each exchange is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    /// Nothing.
    #[default]
    None,
    /// Request method and URL, response status and elapsed time.
    Basic,
    /// `Basic` plus request and response headers.
    Headers,
    /// `Headers` plus request and response bodies.
    Full,
}

/// Sink for formatted log lines.
pub trait Logger: Send + Sync {
    /// Record one line for the operation named by `method_key`.
    fn log(&self, method_key: &str, message: &str);
}

/// Emits lines as `tracing` events at DEBUG under the `mailgun_client` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, method_key: &str, message: &str) {
        tracing::debug!(target: "mailgun_client", method = method_key, "{message}");
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    fn log(&self, _method_key: &str, _message: &str) {}
}

pub(crate) fn log_request(logger: &dyn Logger, level: LogLevel, key: &str, request: &Request) {
    if level < LogLevel::Basic {
        return;
    }
    logger.log(key, &format!("---> {} {}", request.method, request.url));
    if level < LogLevel::Headers {
        return;
    }
    log_headers(logger, key, &request.headers);

    let body_len = request.body.as_ref().map_or(0, Vec::len);
    if level >= LogLevel::Full {
        if let Some(body) = &request.body {
            logger.log(key, &String::from_utf8_lossy(body));
        }
    }
    logger.log(key, &format!("---> END HTTP ({body_len}-byte body)"));
}

pub(crate) fn log_response(
    logger: &dyn Logger,
    level: LogLevel,
    key: &str,
    response: &Response,
    elapsed: Duration,
) {
    if level < LogLevel::Basic {
        return;
    }
    logger.log(
        key,
        &format!("<--- {} ({}ms)", response.status, elapsed.as_millis()),
    );
    if level < LogLevel::Headers {
        return;
    }
    log_headers(logger, key, &response.headers);

    if level >= LogLevel::Full && !response.body.is_empty() {
        logger.log(key, &response.text());
    }
    logger.log(
        key,
        &format!("<--- END HTTP ({}-byte body)", response.body.len()),
    );
}

pub(crate) fn log_transport_error(
    logger: &dyn Logger,
    level: LogLevel,
    key: &str,
    error: &Error,
    elapsed: Duration,
) {
    if level >= LogLevel::Basic {
        logger.log(
            key,
            &format!("<--- ERROR {error} ({}ms)", elapsed.as_millis()),
        );
    }
}

pub(crate) fn log_retry(logger: &dyn Logger, level: LogLevel, key: &str, delay: Duration) {
    if level >= LogLevel::Basic {
        logger.log(key, &format!("---> RETRYING in {}ms", delay.as_millis()));
    }
}

fn log_headers(logger: &dyn Logger, key: &str, headers: &HeaderMap) {
    for (name, value) in headers {
        if name == AUTHORIZATION {
            logger.log(key, &format!("{name}: <redacted>"));
        } else {
            logger.log(
                key,
                &format!("{name}: {}", value.to_str().unwrap_or("<binary>")),
            );
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use reqwest::{Method, StatusCode};
    use std::sync::{Arc, Mutex};

    /// Collects every line it receives.
    #[derive(Default, Clone)]
    pub(crate) struct RecordingLogger {
        pub(crate) lines: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingLogger {
        pub(crate) fn lines(&self) -> Vec<String> {
            self.lines.lock().unwrap().clone()
        }
    }

    impl Logger for RecordingLogger {
        fn log(&self, method_key: &str, message: &str) {
            self.lines
                .lock()
                .unwrap()
                .push(format!("[{method_key}] {message}"));
        }
    }

    fn request() -> Request {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic c2VjcmV0"));
        Request {
            method: Method::POST,
            url: "https://api.mailgun.net/v3/example.com/messages".parse().unwrap(),
            headers,
            body: Some(b"to=bob".to_vec()),
        }
    }

    #[test]
    fn none_logs_nothing() {
        let logger = RecordingLogger::default();
        log_request(&logger, LogLevel::None, "Api#op", &request());
        log_retry(&logger, LogLevel::None, "Api#op", Duration::from_millis(5));
        assert!(logger.lines().is_empty());
    }

    #[test]
    fn basic_logs_request_line_only() {
        let logger = RecordingLogger::default();
        log_request(&logger, LogLevel::Basic, "Api#op", &request());
        assert_eq!(
            logger.lines(),
            vec!["[Api#op] ---> POST https://api.mailgun.net/v3/example.com/messages"]
        );
    }

    #[test]
    fn full_logs_redacted_headers_and_body() {
        let logger = RecordingLogger::default();
        log_request(&logger, LogLevel::Full, "Api#op", &request());

        let lines = logger.lines();
        assert!(lines.contains(&"[Api#op] authorization: <redacted>".to_string()));
        assert!(lines.contains(&"[Api#op] to=bob".to_string()));
        assert_eq!(lines.last().unwrap(), "[Api#op] ---> END HTTP (6-byte body)");
        assert!(!lines.iter().any(|l| l.contains("c2VjcmV0")));
    }

    #[test]
    fn response_line_includes_status_and_elapsed() {
        let logger = RecordingLogger::default();
        let response = Response::new(StatusCode::OK, HeaderMap::new(), b"{}".to_vec());
        log_response(
            &logger,
            LogLevel::Basic,
            "Api#op",
            &response,
            Duration::from_millis(42),
        );
        assert_eq!(logger.lines(), vec!["[Api#op] <--- 200 OK (42ms)"]);
    }
}
