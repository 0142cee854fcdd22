use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use crate::{
    scheduler::wait_backoff, Classifier, EnrichlyError, Outcome, Request, Result, RetryPolicy,
    Transport,
};

/// Pending handle for one dispatch.
///
/// Resolves exactly once with the dispatch's terminal result: a classified
/// [`Outcome`] (success or failure), or an error for exhausted transport
/// failures and shutdown. The underlying work runs on the client's scheduler,
/// so a caller that blocks on this handle from a synchronous wrapper does not
/// stall retries.
#[must_use = "a dispatch does nothing unless awaited"]
pub struct Dispatch {
    state: State,
}

enum State {
    /// Resolved before any work was scheduled (shutdown fail-fast).
    Ready(Option<Result<Outcome>>),
    Pending(oneshot::Receiver<Result<Outcome>>),
}

impl Dispatch {
    pub(crate) fn ready(result: Result<Outcome>) -> Self {
        Self {
            state: State::Ready(Some(result)),
        }
    }

    pub(crate) fn pending(rx: oneshot::Receiver<Result<Outcome>>) -> Self {
        Self {
            state: State::Pending(rx),
        }
    }
}

impl Future for Dispatch {
    type Output = Result<Outcome>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match &mut this.state {
            State::Ready(slot) => {
                // Polling again after completion yields ClientShutdown rather
                // than panicking.
                let result = slot.take().unwrap_or(Err(EnrichlyError::ClientShutdown));
                Poll::Ready(result)
            }
            State::Pending(rx) => match Pin::new(rx).poll(cx) {
                Poll::Ready(Ok(result)) => Poll::Ready(result),
                // Sender dropped without resolving: the scheduler was torn
                // down before the dispatch task could run.
                Poll::Ready(Err(_)) => Poll::Ready(Err(EnrichlyError::ClientShutdown)),
                Poll::Pending => Poll::Pending,
            },
        }
    }
}

/// Drives one dispatch to its terminal result.
///
/// An explicit loop rather than re-entrant callbacks: attempts are strictly
/// sequential, the attempt counter lives on the stack frame, and shutdown is
/// checked at one place per iteration plus inside every backoff wait.
///
/// Resolution rules:
/// - HTTP response, not retry-worthy (or budget exhausted) → `Ok(classified)`.
///   Exhausting retries on an HTTP-valid response is not an error.
/// - Transport failure with budget left → backoff, retry.
/// - Transport failure, budget exhausted → `Err` with that failure.
/// - Shutdown observed → `Err(ClientShutdown)` without further network I/O.
pub(crate) async fn drive(
    transport: Arc<dyn Transport>,
    request: Request,
    policy: RetryPolicy,
    classifier: Classifier,
    shutdown: CancellationToken,
) -> Result<Outcome> {
    let mut attempts_done = 0usize;
    loop {
        if shutdown.is_cancelled() {
            return Err(EnrichlyError::ClientShutdown);
        }

        match transport.send_once(&request).await {
            Ok(response) => {
                if policy.should_retry(response.status) && attempts_done < policy.max_retries {
                    attempts_done += 1;
                    let delay = policy.retry_delay(attempts_done);
                    tracing::debug!(
                        status = response.status,
                        attempt = attempts_done,
                        delay_ms = delay.as_millis() as u64,
                        "retrying after retryable status"
                    );
                    if wait_backoff(delay, &shutdown).await {
                        return Err(EnrichlyError::ClientShutdown);
                    }
                    continue;
                }
                return Ok(classifier.classify(&response));
            }
            Err(err) => {
                if attempts_done < policy.max_retries {
                    attempts_done += 1;
                    let delay = policy.retry_delay(attempts_done);
                    tracing::debug!(
                        error = %err,
                        attempt = attempts_done,
                        delay_ms = delay.as_millis() as u64,
                        "retrying after transport error"
                    );
                    if wait_backoff(delay, &shutdown).await {
                        return Err(EnrichlyError::ClientShutdown);
                    }
                    continue;
                }
                return Err(err);
            }
        }
    }
}
