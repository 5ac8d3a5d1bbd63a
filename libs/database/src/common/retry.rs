use std::time::Duration;

/// Retry policy for recoverable database failures
///
/// The backoff is deliberately linear: attempt `n` (0-indexed) waits
/// `base_delay * (n + 1)` before the next try. A pooler conflict resolves as
/// soon as the session is replaced, so there is no value in exponential growth
/// or jitter here — this is not a general circuit breaker.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts after the initial try
    pub max_retries: u32,

    /// Base delay; multiplied by the attempt number for linear backoff
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Create a new retry policy with defaults
    ///
    /// Defaults:
    /// - max_retries: 3
    /// - base_delay: 500ms
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the retry budget
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Override the base delay
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Delay before the retry following failed attempt `attempt` (0-indexed)
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.base_delay * (attempt + 1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}
