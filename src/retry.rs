use std::time::Duration;

/// Status codes retried by default: rate limiting and the transient 5xx class.
const DEFAULT_RETRY_ON: [u16; 5] = [429, 500, 502, 503, 504];

/// Pure retry decision value for one dispatch.
///
/// The policy is consulted after every attempt: `should_retry` decides whether
/// the status code is transient, `max_retries` bounds the number of additional
/// attempts after the first, and `retry_delay` yields the backoff before retry
/// number `n` — `base_delay_ms × 2^(n-1)`, so the first retry waits exactly
/// `base_delay_ms`. No jitter, no delay cap.
///
/// Transport-level failures (connect errors, timeouts) are always considered
/// transient and draw from the same `max_retries` budget; `should_retry` only
/// governs HTTP status codes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt.
    pub max_retries: usize,
    /// Base backoff in milliseconds (doubled on each subsequent retry).
    pub base_delay_ms: u64,
    /// Status codes considered transient.
    pub retry_on: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 1,
            base_delay_ms: 1_000,
            retry_on: DEFAULT_RETRY_ON.to_vec(),
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with the default transient status set.
    pub fn new(max_retries: usize, base_delay_ms: u64) -> Self {
        Self {
            max_retries,
            base_delay_ms,
            ..Self::default()
        }
    }

    /// Creates a policy that never retries.
    pub fn none() -> Self {
        Self::new(0, 0)
    }

    /// Whether a response with this status code should be retried.
    pub fn should_retry(&self, status: u16) -> bool {
        self.retry_on.contains(&status)
    }

    /// Backoff before retry number `attempt` (1-based).
    ///
    /// The exponent saturates at 16 so the shift cannot overflow; the
    /// multiplication saturates at `u64::MAX` milliseconds.
    pub fn retry_delay(&self, attempt: usize) -> Duration {
        let exp = attempt.saturating_sub(1).min(16) as u32;
        let multiplier = 1u64 << exp;
        Duration::from_millis(self.base_delay_ms.saturating_mul(multiplier))
    }
}
