//! Future wrappers that settle a `Result` future into an [`Outcome`].
//!
//! - [`ContextFuture`] converts the error and attaches context lazily.
//! - [`AttemptFuture`] converts the error and catches panics raised while polling.
//! - [`CancelOn`] resolves to a cancellation failure when a signal fires first.

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::future::FusedFuture;
use pin_project_lite::pin_project;

use crate::traits::{IntoErrorContext, IntoErrorInfo};
use crate::types::{ErrorInfo, Outcome};

pin_project! {
    /// Attaches context to a future's failure.
    ///
    /// The context closure only runs when the inner future resolves to an error.
    ///
    /// # Cancel Safety
    ///
    /// `ContextFuture` is cancel-safe if the inner future is cancel-safe.
    #[must_use = "futures do nothing unless polled"]
    pub struct ContextFuture<Fut, F> {
        #[pin]
        future: Fut,
        context_fn: Option<F>,
    }
}

impl<Fut, F> ContextFuture<Fut, F> {
    #[inline]
    pub fn new(future: Fut, context_fn: F) -> Self {
        Self { future, context_fn: Some(context_fn) }
    }
}

impl<Fut, F, C, T, E> Future for ContextFuture<Fut, F>
where
    Fut: Future<Output = Result<T, E>>,
    E: IntoErrorInfo,
    F: FnOnce() -> C,
    C: IntoErrorContext,
{
    type Output = Outcome<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();

        this.future.poll(cx).map(|res| {
            res.map_err(|err| {
                let err = err.into_error_info();
                match this.context_fn.take() {
                    Some(context_fn) => err.with_context(context_fn()),
                    None => err,
                }
            })
        })
    }
}

impl<Fut, F, C, T, E> FusedFuture for ContextFuture<Fut, F>
where
    Fut: FusedFuture<Output = Result<T, E>>,
    E: IntoErrorInfo,
    F: FnOnce() -> C,
    C: IntoErrorContext,
{
    fn is_terminated(&self) -> bool {
        // context_fn is taken on error completion
        self.context_fn.is_none() || self.future.is_terminated()
    }
}

pin_project! {
    /// Settles a future into an [`Outcome`], turning a panic during polling
    /// into a [`Panicked`](crate::Panicked) failure.
    #[must_use = "futures do nothing unless polled"]
    pub struct AttemptFuture<Fut> {
        #[pin]
        future: Fut,
        done: bool,
    }
}

impl<Fut> AttemptFuture<Fut> {
    #[inline]
    pub fn new(future: Fut) -> Self {
        Self { future, done: false }
    }
}

impl<Fut, T, E> Future for AttemptFuture<Fut>
where
    Fut: Future<Output = Result<T, E>>,
    E: IntoErrorInfo,
{
    type Output = Outcome<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let future = this.future;

        match panic::catch_unwind(AssertUnwindSafe(|| future.poll(cx))) {
            Ok(Poll::Pending) => Poll::Pending,
            Ok(Poll::Ready(result)) => {
                *this.done = true;
                Poll::Ready(result.map_err(IntoErrorInfo::into_error_info))
            },
            Err(payload) => {
                *this.done = true;
                Poll::Ready(Err(ErrorInfo::from_panic(payload)))
            },
        }
    }
}

impl<Fut, T, E> FusedFuture for AttemptFuture<Fut>
where
    Fut: Future<Output = Result<T, E>>,
    E: IntoErrorInfo,
{
    fn is_terminated(&self) -> bool {
        self.done
    }
}

pin_project! {
    /// Races a future against a cancellation signal.
    ///
    /// The signal is polled first, so a signal that is already complete wins
    /// even when the operation is ready too.
    #[must_use = "futures do nothing unless polled"]
    pub struct CancelOn<Fut, S> {
        #[pin]
        future: Fut,
        #[pin]
        signal: S,
    }
}

impl<Fut, S> CancelOn<Fut, S> {
    #[inline]
    pub fn new(future: Fut, signal: S) -> Self {
        Self { future, signal }
    }
}

impl<Fut, S, T, E> Future for CancelOn<Fut, S>
where
    Fut: Future<Output = Result<T, E>>,
    E: IntoErrorInfo,
    S: Future,
{
    type Output = Outcome<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();

        if this.signal.poll(cx).is_ready() {
            rail_trace!(debug, "step cancelled by signal");
            return Poll::Ready(Err(ErrorInfo::cancelled()));
        }

        this.future.poll(cx).map(|res| res.map_err(IntoErrorInfo::into_error_info))
    }
}
