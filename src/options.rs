//! Endpoints and per-request transport options.

use crate::Error;
use std::str::FromStr;
use std::time::Duration;

/// Base URL of Mailgun's US deployment, used unless another one is configured.
pub const DEFAULT_BASE_URL_US_REGION: &str = "https://api.mailgun.net/";
/// Base URL of Mailgun's EU deployment.
pub const EU_REGION_BASE_URL: &str = "https://api.eu.mailgun.net/";

/// Mailgun deployment region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Region {
    /// United States, `api.mailgun.net`.
    #[default]
    Us,
    /// European Union, `api.eu.mailgun.net`.
    Eu,
}

impl Region {
    /// Base URL of the region's API endpoint.
    pub fn base_url(self) -> &'static str {
        match self {
            Region::Us => DEFAULT_BASE_URL_US_REGION,
            Region::Eu => EU_REGION_BASE_URL,
        }
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "us" => Ok(Region::Us),
            "eu" => Ok(Region::Eu),
            other => Err(Error::Config(format!("unknown Mailgun region: {other}"))),
        }
    }
}

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(60);

/// Timeouts and redirect policy handed to the transport with every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    connect_timeout: Duration,
    read_timeout: Duration,
    follow_redirects: bool,
}

impl RequestOptions {
    /// Options with explicit timeouts and redirect handling.
    pub fn new(connect_timeout: Duration, read_timeout: Duration, follow_redirects: bool) -> Self {
        Self {
            connect_timeout,
            read_timeout,
            follow_redirects,
        }
    }

    /// Time allowed to establish a connection.
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Time allowed for the whole exchange once connected.
    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Whether 3xx responses are followed.
    pub fn follow_redirects(&self) -> bool {
        self.follow_redirects
    }
}

impl Default for RequestOptions {
    /// 10s connect timeout, 60s read timeout, redirects followed.
    fn default() -> Self {
        Self::new(DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_TIMEOUT, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_parsing() {
        assert_eq!("us".parse::<Region>().unwrap(), Region::Us);
        assert_eq!(" EU ".parse::<Region>().unwrap(), Region::Eu);
        assert!(matches!("apac".parse::<Region>(), Err(Error::Config(_))));
        assert_eq!(Region::Eu.base_url(), EU_REGION_BASE_URL);
        assert_eq!(Region::default().base_url(), DEFAULT_BASE_URL_US_REGION);
    }

    #[test]
    fn default_options() {
        let options = RequestOptions::default();
        assert_eq!(options.connect_timeout(), Duration::from_secs(10));
        assert_eq!(options.read_timeout(), Duration::from_secs(60));
        assert!(options.follow_redirects());
    }
}
