//! Tokio runtime helpers for steps.
//!
//! Requires the `async-tokio` feature.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::task::{AbortHandle, JoinError, JoinHandle};

use crate::traits::IntoErrorInfo;
use crate::types::{ErrorInfo, Outcome};

/// A step running on its own Tokio task.
///
/// Awaiting the handle yields the step's outcome. Aborting the task settles
/// it as a [`Cancelled`](crate::Cancelled) failure and a panic inside the
/// task as a [`Panicked`](crate::Panicked) failure.
#[must_use = "dropping the handle detaches the task"]
#[derive(Debug)]
pub struct StepHandle<T> {
    inner: JoinHandle<Outcome<T>>,
}

impl<T> StepHandle<T> {
    /// Requests cancellation of the task.
    pub fn abort(&self) {
        self.inner.abort();
    }

    pub fn abort_handle(&self) -> AbortHandle {
        self.inner.abort_handle()
    }

    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }
}

impl<T> Future for StepHandle<T> {
    type Output = Outcome<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.inner).poll(cx).map(|joined| joined.unwrap_or_else(join_failure))
    }
}

fn join_failure<T>(err: JoinError) -> Outcome<T> {
    if err.is_cancelled() {
        rail_trace!(debug, "spawned step cancelled");
        return Err(ErrorInfo::cancelled());
    }
    match err.try_into_panic() {
        Ok(payload) => Err(ErrorInfo::from_panic(payload)),
        Err(err) => Err(ErrorInfo::from_error(err)),
    }
}

/// Spawns a step future onto the current Tokio runtime.
///
/// # Panics
///
/// Panics if called outside a Tokio runtime, like [`tokio::spawn`].
///
/// # Example
///
/// ```rust
/// use step_rail::async_ext::spawn_step;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let handle = spawn_step(async { Err::<u32, _>("not found") });
/// assert_eq!(handle.await.unwrap_err().message(), "not found");
/// # }
/// ```
pub fn spawn_step<Fut, T, E>(future: Fut) -> StepHandle<T>
where
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    E: IntoErrorInfo,
    T: Send + 'static,
{
    let inner = tokio::spawn(async move { future.await.map_err(IntoErrorInfo::into_error_info) });
    StepHandle { inner }
}

/// Awaits a step with a deadline.
///
/// When the deadline passes first, the step is dropped and the outcome is a
/// [`TimedOut`](crate::TimedOut) failure.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use step_rail::async_ext::step_timeout;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let slow = std::future::pending::<Result<(), &str>>();
/// let err = step_timeout(Duration::from_millis(5), slow).await.unwrap_err();
/// assert!(err.is_timeout());
/// # }
/// ```
pub async fn step_timeout<Fut, T, E>(duration: Duration, future: Fut) -> Outcome<T>
where
    Fut: Future<Output = Result<T, E>>,
    E: IntoErrorInfo,
{
    match tokio::time::timeout(duration, future).await {
        Ok(result) => result.map_err(IntoErrorInfo::into_error_info),
        Err(_elapsed) => {
            rail_trace!(warn, ?duration, "step timed out");
            Err(ErrorInfo::timed_out(duration))
        },
    }
}
