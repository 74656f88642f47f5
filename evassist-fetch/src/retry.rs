//! Retry policy for network calls.

use std::time::Duration;

use crate::error::NetworkError;

/// Default per-attempt timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default number of attempts, including the first.
const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default fixed delay between attempts.
const DEFAULT_DELAY_MS: u64 = 1000;

/// How a [`NetworkCall`](crate::NetworkCall) bounds and repeats requests.
///
/// Only transient failures (see [`NetworkError::is_transient`]) are retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,
    /// Deadline for each individual attempt.
    pub timeout: Duration,
    /// Fixed delay between attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy with the given attempt count and default timings.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
        }
    }

    /// Disables retries.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            delay: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Sets the per-attempt timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the delay between attempts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of attempts to make (at least one).
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Returns the delay before the attempt following `attempt`.
    pub fn delay_for_attempt(&self, _attempt: u32) -> Duration {
        self.delay
    }

    /// Determines if a failed attempt should be retried.
    pub fn should_retry(&self, error: &NetworkError) -> bool {
        error.is_transient()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_delay() {
        let policy = RetryPolicy::default().with_delay(Duration::from_millis(250));

        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(250));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(250));
        assert_eq!(policy.delay_for_attempt(5), Duration::from_millis(250));
    }

    #[test]
    fn test_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_no_retry_still_attempts_once() {
        assert_eq!(RetryPolicy::no_retry().attempts(), 1);
        assert_eq!(RetryPolicy::new(0).attempts(), 1);
    }

    #[test]
    fn test_should_retry() {
        let policy = RetryPolicy::default();
        assert!(policy.should_retry(&NetworkError::Connection("refused".into())));
        assert!(!policy.should_retry(&NetworkError::Http { status: 400, body: String::new() }));
    }
}
