/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum EnrichlyError {
    /// Network-level failure on the final attempt (connect, timeout, body read).
    ///
    /// Transient transport failures are retried per [`crate::RetryPolicy`]; this
    /// variant surfaces only once the retry budget is exhausted.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// The client was closed before or during this dispatch.
    ///
    /// Returned synchronously by `send` after `close()`, and by in-flight
    /// dispatches whose backoff wait was interrupted by shutdown.
    #[error("client has been shut down")]
    ClientShutdown,
    /// Query validation failure before any network activity.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    /// Request encoding or response payload decoding error.
    #[error("decode error: {0}")]
    Decode(String),
    /// Client construction or environment configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl EnrichlyError {
    pub(crate) fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Box::new(err))
    }
}
