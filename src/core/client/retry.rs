use std::collections::HashSet;
use std::time::Duration;

use crate::core::GhostError;

/// Smallest base delay the client will wait between attempts.
pub const MIN_BASE_DELAY: Duration = Duration::from_millis(100);

/// Configuration for the automatic retry mechanism.
///
/// The policy is shared by every request of a client and never changes after
/// the client is built. Out-of-range values are clamped at build time (see
/// [`RetryConfig::normalized`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total number of attempts, including the first one. At least 1.
    pub max_attempts: u32,
    /// The delay before the first retry.
    pub base_delay: Duration,
    /// Double the delay after every failed attempt instead of keeping it fixed.
    pub exponential_backoff: bool,
    /// Upper bound for any single delay.
    pub max_delay: Duration,
    /// HTTP status codes considered transient.
    pub retryable_status: HashSet<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            exponential_backoff: true,
            max_delay: Duration::from_secs(30),
            retryable_status: [408, 429, 500, 502, 503, 504].into_iter().collect(),
        }
    }
}

/// What the executor does after an attempt has resolved.
#[derive(Debug)]
pub(crate) enum Step {
    /// The attempt produced a body.
    Done(Vec<u8>),
    /// The failure is transient and attempts remain: wait, then try again.
    Retry { delay: Duration, error: GhostError },
    /// The failure is terminal.
    Fail(GhostError),
}

impl RetryConfig {
    /// A policy that performs a single attempt.
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Sets the total number of attempts.
    #[must_use]
    pub const fn max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n;
        self
    }

    /// Sets the base delay.
    #[must_use]
    pub const fn base_delay(mut self, d: Duration) -> Self {
        self.base_delay = d;
        self
    }

    /// Enables or disables exponential backoff.
    #[must_use]
    pub const fn exponential_backoff(mut self, enabled: bool) -> Self {
        self.exponential_backoff = enabled;
        self
    }

    /// Sets the delay cap.
    #[must_use]
    pub const fn max_delay(mut self, d: Duration) -> Self {
        self.max_delay = d;
        self
    }

    /// Replaces the set of retryable status codes.
    #[must_use]
    pub fn retryable_status(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.retryable_status = codes.into_iter().collect();
        self
    }

    /// Clamps the policy into its valid range: at least one attempt, a base
    /// delay of at least [`MIN_BASE_DELAY`] and a cap no lower than the base.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.max_attempts = self.max_attempts.max(1);
        self.base_delay = self.base_delay.max(MIN_BASE_DELAY);
        self.max_delay = self.max_delay.max(self.base_delay);
        self
    }

    /// The delay to wait after the given (1-based) attempt has failed.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        if !self.exponential_backoff {
            return self.base_delay;
        }
        let factor = 2u32.saturating_pow(attempt - 1);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Whether a failure of this kind may succeed on another attempt.
    pub fn should_retry(&self, err: &GhostError) -> bool {
        match err {
            GhostError::Timeout | GhostError::Network { .. } => true,
            GhostError::Http { status, .. } => self.retryable_status.contains(status),
            _ => false,
        }
    }

    pub(crate) fn next_step(&self, attempt: u32, result: Result<Vec<u8>, GhostError>) -> Step {
        match result {
            Ok(body) => Step::Done(body),
            Err(error) if attempt < self.max_attempts && self.should_retry(&error) => Step::Retry {
                delay: self.delay_for_attempt(attempt),
                error,
            },
            Err(error) => Step::Fail(error),
        }
    }
}

/// Defines the behavior of the in-memory cache for an API call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CacheMode {
    /// Read from the cache if a non-expired entry is present; otherwise, fetch from the network
    /// and write the response to the cache. (Default)
    #[default]
    Use,
    /// Always fetch from the network, bypassing any cached entry, and write the new response to the cache.
    Refresh,
    /// Always fetch from the network and do not read from or write to the cache.
    Bypass,
}
