use std::time::Duration;

use prune_config::RetryConfig;

/// How often and how patiently to retry a retryable failure.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub retries: u32,
    pub min_timeout: Duration,
    pub max_timeout: Duration,
    pub factor: f64,
}

impl RetryPolicy {
    /// Total attempts including the first one.
    pub fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }

    /// Wait before the `retry`-th retry (1-based).
    ///
    /// `min_timeout * factor^(retry - 1)`, capped at `max_timeout`.
    pub fn backoff(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(i32::MAX as u32) as i32;
        let secs = self.min_timeout.as_secs_f64() * self.factor.powi(exponent);

        if !secs.is_finite() || secs >= self.max_timeout.as_secs_f64() {
            self.max_timeout
        } else {
            Duration::from_secs_f64(secs.max(0.0))
        }
    }

    /// A policy that never retries.
    pub fn no_retry() -> Self {
        Self {
            retries: 0,
            min_timeout: Duration::ZERO,
            max_timeout: Duration::ZERO,
            factor: 1.0,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            retries: config.retries,
            min_timeout: config.min_timeout(),
            max_timeout: config.max_timeout(),
            factor: config.factor,
        }
    }
}
