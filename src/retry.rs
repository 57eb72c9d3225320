//! Retry policies consulted after each failed attempt.

use crate::Error;
use rand::Rng;
use std::time::Duration;

/// Decides whether, and after how long, a failed request is attempted again.
pub trait Retryer: Send + Sync {
    /// Delay before the next attempt, or `None` to give up with `error`.
    ///
    /// `attempt` counts the attempts made so far, starting at 1.
    fn backoff(&self, attempt: u32, error: &Error) -> Option<Duration>;
}

const DEFAULT_PERIOD: Duration = Duration::from_millis(100);
const DEFAULT_MAX_PERIOD: Duration = Duration::from_secs(1);
const DEFAULT_MAX_ATTEMPTS: u32 = 5;
const BACKOFF_MULTIPLIER: f64 = 1.5;

/// Exponential backoff over retryable errors.
///
/// The interval after attempt `n` is `period * 1.5^n`, capped at
/// `max_period`, so the first retry waits `1.5 * period`. A server-provided
/// `Retry-After` replaces the computed interval, still capped at `max_period`.
#[derive(Debug, Clone)]
pub struct DefaultRetryer {
    period: Duration,
    max_period: Duration,
    max_attempts: u32,
    jitter: bool,
}

impl DefaultRetryer {
    /// Retry up to `max_attempts` total attempts, starting from `period`.
    pub fn new(period: Duration, max_period: Duration, max_attempts: u32) -> Self {
        Self {
            period,
            max_period,
            max_attempts,
            jitter: false,
        }
    }

    /// Randomize each delay within `[0, interval)`.
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Total attempts, the first one included.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    fn interval(&self, attempt: u32) -> Duration {
        let exponent = attempt.min(i32::MAX as u32) as i32;
        let millis = self.period.as_millis() as f64 * BACKOFF_MULTIPLIER.powi(exponent);
        Duration::from_millis(millis as u64).min(self.max_period)
    }
}

impl Default for DefaultRetryer {
    /// 100ms period, 1s max period, 5 attempts.
    fn default() -> Self {
        Self::new(DEFAULT_PERIOD, DEFAULT_MAX_PERIOD, DEFAULT_MAX_ATTEMPTS)
    }
}

impl Retryer for DefaultRetryer {
    fn backoff(&self, attempt: u32, error: &Error) -> Option<Duration> {
        if attempt >= self.max_attempts || !error.is_retryable() {
            return None;
        }

        let interval = match error.retry_after() {
            Some(after) => after.min(self.max_period),
            None => self.interval(attempt),
        };

        if self.jitter && !interval.is_zero() {
            let millis = rand::rng().random_range(0.0..interval.as_millis() as f64);
            return Some(Duration::from_millis(millis as u64));
        }
        Some(interval)
    }
}

/// Never retries; every failure is returned to the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverRetry;

impl Retryer for NeverRetry {
    fn backoff(&self, _attempt: u32, _error: &Error) -> Option<Duration> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn retryable(retry_after: Option<Duration>) -> Error {
        Error::Retryable {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: "try later".into(),
            retry_after,
        }
    }

    #[test]
    fn exponential_interval_is_capped() {
        let retryer = DefaultRetryer::new(Duration::from_millis(100), Duration::from_millis(300), 10);
        let error = retryable(None);

        assert_eq!(retryer.backoff(1, &error), Some(Duration::from_millis(150)));
        assert_eq!(retryer.backoff(2, &error), Some(Duration::from_millis(225)));
        assert_eq!(retryer.backoff(3, &error), Some(Duration::from_millis(300)));
        assert_eq!(retryer.backoff(9, &error), Some(Duration::from_millis(300)));
    }

    #[test]
    fn stops_after_max_attempts() {
        let retryer = DefaultRetryer::default();
        let error = retryable(None);

        assert!(retryer.backoff(4, &error).is_some());
        assert_eq!(retryer.backoff(5, &error), None);
    }

    #[test]
    fn retry_after_overrides_interval() {
        let retryer = DefaultRetryer::default();

        assert_eq!(
            retryer.backoff(1, &retryable(Some(Duration::from_millis(500)))),
            Some(Duration::from_millis(500))
        );
        assert_eq!(
            retryer.backoff(1, &retryable(Some(Duration::from_secs(30)))),
            Some(Duration::from_secs(1))
        );
    }

    #[test]
    fn non_retryable_errors_are_returned() {
        let error = Error::Api {
            status: StatusCode::BAD_REQUEST,
            message: "bad".into(),
        };
        assert_eq!(DefaultRetryer::default().backoff(1, &error), None);
        assert_eq!(NeverRetry.backoff(1, &retryable(None)), None);
    }

    #[test]
    fn jitter_stays_below_interval() {
        let retryer = DefaultRetryer::default().with_jitter(true);
        let error = retryable(None);

        for _ in 0..20 {
            let delay = retryer.backoff(1, &error).unwrap();
            assert!(delay < Duration::from_millis(150));
        }
    }
}
