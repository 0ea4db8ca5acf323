//! Retry policy for transient failures.

use std::time::Duration;

use reqwest::Method;
use reqwest::StatusCode;

use crate::error::ApiError;

/// Configuration for automatic retry behavior.
///
/// Applies to rate limiting (429), server errors (5xx) and network errors
/// including timeouts. Delays double after each attempt up to `max_delay`;
/// a `Retry-After` header on a 429 overrides the computed delay but is
/// capped at `max_delay` too.
///
/// A POST may already have been applied when it fails with a 5xx or a
/// timeout, so it is only resent after a 429 or when the connection was
/// never made.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use reelboard_lib::api::RetryConfig;
///
/// let custom = RetryConfig::default()
///     .max_retries(5)
///     .initial_delay(Duration::from_millis(250));
///
/// let none = RetryConfig::no_retry();
/// assert_eq!(none.max_retries, 0);
/// # let _ = custom;
/// ```
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Upper bound for any single delay.
    pub max_delay: Duration,
    pub retry_on_429: bool,
    pub retry_on_5xx: bool,
    pub retry_on_network: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            retry_on_429: true,
            retry_on_5xx: true,
            retry_on_network: true,
        }
    }
}

impl RetryConfig {
    /// Creates a config with all retries disabled.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            retry_on_429: false,
            retry_on_5xx: false,
            retry_on_network: false,
            ..Default::default()
        }
    }

    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }

    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn retry_on_429(mut self, enabled: bool) -> Self {
        self.retry_on_429 = enabled;
        self
    }

    pub fn retry_on_5xx(mut self, enabled: bool) -> Self {
        self.retry_on_5xx = enabled;
        self
    }

    pub fn retry_on_network(mut self, enabled: bool) -> Self {
        self.retry_on_network = enabled;
        self
    }

    /// Returns `true` if a `method` request answered with `status` should
    /// be sent again.
    pub fn retries_response(&self, method: &Method, status: StatusCode) -> bool {
        if status == StatusCode::TOO_MANY_REQUESTS {
            return self.retry_on_429;
        }
        status.is_server_error() && self.retry_on_5xx && is_idempotent(method)
    }

    /// Returns `true` if a `method` request that failed with `error` should
    /// be sent again.
    pub fn retries_error(&self, method: &Method, error: &ApiError) -> bool {
        if !self.retry_on_network {
            return false;
        }
        match error {
            ApiError::Network(e) if e.is_connect() => true,
            ApiError::Network(_) | ApiError::Timeout(_) => is_idempotent(method),
            _ => false,
        }
    }

    /// The wait before the next attempt, honoring `retry_after` up to
    /// `max_delay`.
    pub fn wait(&self, delay: Duration, retry_after: Option<Duration>) -> Duration {
        retry_after.unwrap_or(delay).min(self.max_delay)
    }

    /// Delay following `delay` under exponential backoff.
    pub fn next_delay(&self, delay: Duration) -> Duration {
        (delay * 2).min(self.max_delay)
    }
}

fn is_idempotent(method: &Method) -> bool {
    matches!(
        *method,
        Method::GET | Method::HEAD | Method::PUT | Method::DELETE | Method::OPTIONS
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_is_capped() {
        let config = RetryConfig::default()
            .initial_delay(Duration::from_secs(4))
            .max_delay(Duration::from_secs(10));
        let second = config.next_delay(config.initial_delay);
        assert_eq!(second, Duration::from_secs(8));
        assert_eq!(config.next_delay(second), Duration::from_secs(10));
    }

    #[test]
    fn test_retried_statuses() {
        let config = RetryConfig::default().retry_on_5xx(false);
        assert!(config.retries_response(&Method::GET, StatusCode::TOO_MANY_REQUESTS));
        assert!(!config.retries_response(&Method::GET, StatusCode::BAD_GATEWAY));
        assert!(!config.retries_response(&Method::GET, StatusCode::NOT_FOUND));
    }

    #[test]
    fn test_post_is_not_resent_after_server_errors() {
        let config = RetryConfig::default();
        assert!(config.retries_response(&Method::GET, StatusCode::BAD_GATEWAY));
        assert!(config.retries_response(&Method::PUT, StatusCode::SERVICE_UNAVAILABLE));
        assert!(config.retries_response(&Method::DELETE, StatusCode::INTERNAL_SERVER_ERROR));
        assert!(!config.retries_response(&Method::POST, StatusCode::BAD_GATEWAY));
        assert!(config.retries_response(&Method::POST, StatusCode::TOO_MANY_REQUESTS));

        let timeout = ApiError::Timeout(Duration::from_secs(30));
        assert!(config.retries_error(&Method::GET, &timeout));
        assert!(!config.retries_error(&Method::POST, &timeout));
        assert!(!RetryConfig::no_retry().retries_error(&Method::GET, &timeout));
    }

    #[test]
    fn test_retry_after_is_capped() {
        let config = RetryConfig::default().max_delay(Duration::from_secs(10));
        let delay = Duration::from_millis(500);
        assert_eq!(config.wait(delay, None), delay);
        assert_eq!(config.wait(delay, Some(Duration::from_secs(3))), Duration::from_secs(3));
        assert_eq!(config.wait(delay, Some(Duration::from_secs(86400))), Duration::from_secs(10));
    }
}
