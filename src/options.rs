use crate::RetryPolicy;

/// Configures HTTP timeouts and the client-level default retry behavior.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Per-attempt timeout in milliseconds.
    ///
    /// Each retry attempt gets the full timeout again; there is no combined
    /// deadline across attempts.
    pub timeout_ms: u64,
    /// TCP connect timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// Default retry policy applied when `send` is given no per-dispatch policy.
    pub retry: RetryPolicy,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            connect_timeout_ms: 5_000,
            retry: RetryPolicy::default(),
        }
    }
}
