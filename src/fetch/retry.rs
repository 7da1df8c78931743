//! Retry policy
//!
//! A policy is a plain value. Each fetch call keeps its own attempt
//! counter, so concurrent streams never share retry state.

use crate::config::RetryConfig;
use crate::types::BackoffType;
use std::time::Duration;

/// How often and how patiently a failed fetch is repeated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Delay before the first retry
    pub initial_backoff: Duration,
    /// Upper bound on any single delay
    pub max_backoff: Duration,
    /// Type of backoff strategy
    pub backoff_type: BackoffType,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(10),
            backoff_type: BackoffType::Exponential,
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            initial_backoff: Duration::from_millis(config.initial_backoff_ms),
            max_backoff: Duration::from_millis(config.max_backoff_ms),
            backoff_type: config.backoff_type,
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    /// Set max attempts
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Set backoff configuration
    #[must_use]
    pub fn with_backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.backoff_type = backoff_type;
        self.initial_backoff = initial;
        self.max_backoff = max;
        self
    }

    /// Whether another attempt is allowed after `attempt` (1-based) failed
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Delay before the retry that follows failed `attempt` (1-based)
    pub fn backoff(&self, attempt: u32) -> Duration {
        let step = attempt.saturating_sub(1);
        let delay = match self.backoff_type {
            BackoffType::Constant => self.initial_backoff,
            BackoffType::Linear => self.initial_backoff.saturating_mul(step + 1),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(step);
                self.initial_backoff.saturating_mul(factor)
            }
        };

        std::cmp::min(delay, self.max_backoff)
    }

    /// Delay honouring a server hint, still capped by `max_backoff`
    pub fn backoff_with_hint(&self, attempt: u32, hint: Option<Duration>) -> Duration {
        match hint {
            Some(hint) => std::cmp::min(hint, self.max_backoff),
            None => self.backoff(attempt),
        }
    }
}
