use rand::Rng;
use std::time::Duration;

/// High-level classification of a failed call for retry purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Server asked us to slow down (429).
    RateLimited,
    /// Transient server-side failure (500, 502, 503, 504).
    ServerError(u16),
    /// Request did not complete within the call timeout.
    Timeout,
    /// Any other transport-level failure (DNS, connect, reset, ...).
    Network,
    /// Not retried: other 4xx/5xx, malformed response, bad request setup.
    Fatal,
}

impl ErrorKind {
    pub fn is_retryable(self) -> bool {
        !matches!(self, ErrorKind::Fatal)
    }

    /// Short reason used in retry diagnostics.
    pub fn reason(self) -> &'static str {
        match self {
            ErrorKind::RateLimited => "rate-limited",
            ErrorKind::ServerError(_) => "server-error",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Network => "network-error",
            ErrorKind::Fatal => "fatal",
        }
    }
}

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Fatal error; stop without consuming retry budget.
    NoRetry,
    /// Retryable, but the retry budget is spent.
    Exhausted,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Exponential backoff with additive jitter: `base^attempt + U[0, 1)` seconds,
/// capped at `max_delay`.
#[derive(Debug, Clone, Copy)]
pub struct BackoffPolicy {
    /// Exponent base in seconds (2.0 gives 2, 4, 8, 16, 32 s).
    pub base_secs: f64,
    /// Upper bound on a single delay, jitter included.
    pub max_delay: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            base_secs: 2.0,
            max_delay: Duration::from_secs(60),
        }
    }
}

impl BackoffPolicy {
    /// Delay before retry number `attempt` (1-based), with fresh jitter.
    pub fn delay(&self, attempt: u32) -> Duration {
        let jitter = rand::thread_rng().gen_range(0.0..1.0);
        self.delay_with_jitter(attempt, jitter)
    }

    /// Same as [`delay`](Self::delay) with a caller-supplied jitter in `[0, 1)`.
    pub fn delay_with_jitter(&self, attempt: u32, jitter: f64) -> Duration {
        let exp = attempt.min(i32::MAX as u32) as i32;
        let raw = self.base_secs.max(0.0).powi(exp) + jitter.clamp(0.0, 1.0);
        let capped = raw.min(self.max_delay.as_secs_f64()).max(0.0);
        Duration::try_from_secs_f64(capped).unwrap_or(self.max_delay)
    }
}

/// Bounded retry budget plus backoff.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Retries after the initial attempt (total attempts = max_retries + 1).
    pub max_retries: u32,
    pub backoff: BackoffPolicy,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            backoff: BackoffPolicy::default(),
        }
    }
}

impl RetryPolicy {
    /// Decide what to do after a failure, given how many retries were already
    /// spent. The returned delay is for retry number `retries_done + 1`.
    pub fn decide(&self, retries_done: u32, kind: ErrorKind) -> RetryDecision {
        if !kind.is_retryable() {
            return RetryDecision::NoRetry;
        }
        if retries_done >= self.max_retries {
            return RetryDecision::Exhausted;
        }
        RetryDecision::RetryAfter(self.backoff.delay(retries_done + 1))
    }
}
