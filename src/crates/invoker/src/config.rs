//! Invoker configuration.

use crate::breaker::BreakerConfig;
use crate::retry::RetryConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Configuration for the resilient invoker.
///
/// All values are pass-through: sane defaults, overridable from the
/// environment or via builders, no parsing logic of their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokerConfig {
    /// Total attempt budget per invocation (first call included).
    pub max_attempts: u32,

    /// Deadline for each individual attempt.
    pub attempt_timeout: Duration,

    /// Backoff between attempts.
    pub retry: RetryConfig,

    /// Circuit-breaker thresholds.
    pub breaker: BreakerConfig,
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            attempt_timeout: Duration::from_secs(60),
            retry: RetryConfig::default(),
            breaker: BreakerConfig::default(),
        }
    }
}

impl InvokerConfig {
    /// Build configuration from `FIELDPARSE_*` environment variables,
    /// falling back to defaults for anything absent or unparseable.
    ///
    /// Recognized variables: `FIELDPARSE_MAX_ATTEMPTS`,
    /// `FIELDPARSE_ATTEMPT_TIMEOUT_SECS`, `FIELDPARSE_FAILURE_THRESHOLD`,
    /// `FIELDPARSE_COOLDOWN_SECS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            max_attempts: env_u64("FIELDPARSE_MAX_ATTEMPTS")
                .map(|v| v as u32)
                .unwrap_or(defaults.max_attempts),
            attempt_timeout: env_u64("FIELDPARSE_ATTEMPT_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.attempt_timeout),
            breaker: BreakerConfig {
                failure_threshold: env_u64("FIELDPARSE_FAILURE_THRESHOLD")
                    .map(|v| v as u32)
                    .unwrap_or(defaults.breaker.failure_threshold),
                cooldown: env_u64("FIELDPARSE_COOLDOWN_SECS")
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.breaker.cooldown),
            },
            retry: defaults.retry,
        }
    }

    /// Set the attempt budget.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Set the per-attempt deadline.
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// Set the backoff configuration.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Set the breaker thresholds.
    pub fn with_breaker(mut self, breaker: BreakerConfig) -> Self {
        self.breaker = breaker;
        self
    }
}

fn env_u64(var: &str) -> Option<u64> {
    let raw = std::env::var(var).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(var, raw, "ignoring unparseable configuration value");
            None
        }
    }
}
