use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tokio_util::{sync::CancellationToken, task::TaskTracker};

/// Shared retry scheduler for all in-flight dispatches of one client.
///
/// Dispatch work runs on the tokio runtime's worker pool (bounded by the
/// runtime, never a thread per retry); backoff waits are timer-based, so no
/// worker blocks between attempts. The cancellation token fans out shutdown:
/// once cancelled, no scheduled retry performs network I/O.
pub(crate) struct BackoffScheduler {
    shutdown: CancellationToken,
    tasks: TaskTracker,
}

impl BackoffScheduler {
    pub(crate) fn new() -> Self {
        Self {
            shutdown: CancellationToken::new(),
            tasks: TaskTracker::new(),
        }
    }

    pub(crate) fn is_shutdown(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    pub(crate) fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Spawns one dispatch onto the runtime's worker pool.
    ///
    /// Must be called from within a tokio runtime.
    pub(crate) fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tasks.spawn(future);
    }

    /// Idempotent teardown: cancels every pending backoff wait.
    pub(crate) fn shutdown(&self) {
        self.shutdown.cancel();
        self.tasks.close();
    }
}

impl Drop for BackoffScheduler {
    // Fallback for clients dropped without an explicit close().
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Waits out a backoff delay, racing it against shutdown.
///
/// Returns `true` if shutdown fired first; the caller must then short-circuit
/// to `ClientShutdown` instead of issuing another attempt.
pub(crate) async fn wait_backoff(delay: Duration, shutdown: &CancellationToken) -> bool {
    tokio::select! {
        () = shutdown.cancelled() => true,
        () = sleep(delay) => false,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio_util::sync::CancellationToken;

    use super::{wait_backoff, BackoffScheduler};

    #[tokio::test(start_paused = true)]
    async fn wait_backoff_completes_when_not_cancelled() {
        let token = CancellationToken::new();
        let interrupted = wait_backoff(Duration::from_secs(30), &token).await;
        assert!(!interrupted);
    }

    #[tokio::test]
    async fn wait_backoff_short_circuits_on_shutdown() {
        let token = CancellationToken::new();
        let waiter = {
            let token = token.clone();
            tokio::spawn(async move { wait_backoff(Duration::from_secs(60), &token).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        token.cancel();
        let interrupted = waiter.await.expect("waiter task must not panic");
        assert!(interrupted);
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let scheduler = BackoffScheduler::new();
        assert!(!scheduler.is_shutdown());
        scheduler.shutdown();
        scheduler.shutdown();
        assert!(scheduler.is_shutdown());
    }
}
