//! Extension trait for `Future<Output = Result<T, E>>`.
//!
//! Mirrors [`ResultExt`](crate::traits::ResultExt) for async code, and adds
//! panic capture and cancellation.

use std::future::Future;

use crate::traits::{IntoErrorContext, IntoErrorInfo};

use super::context_future::{AttemptFuture, CancelOn, ContextFuture};

/// Settles result-returning futures into [`Outcome`](crate::Outcome)s.
///
/// # Examples
///
/// ```rust
/// use step_rail::prelude_async::*;
///
/// async fn example() {
///     let err = async { Err::<(), _>("connection reset") }
///         .ctx("publishing message")
///         .await
///         .unwrap_err();
///     assert_eq!(err.error_chain(), "publishing message -> connection reset");
/// }
/// ```
pub trait FutureOutcomeExt<T, E>: Future<Output = Result<T, E>> + Sized {
    /// Converts the error and attaches `context` on failure.
    fn ctx<C>(self, context: C) -> ContextFuture<Self, impl FnOnce() -> C>
    where
        C: IntoErrorContext,
    {
        self.with_ctx(move || context)
    }

    /// Converts the error and attaches a context built only on failure.
    fn with_ctx<F, C>(self, f: F) -> ContextFuture<Self, F>
    where
        F: FnOnce() -> C,
        C: IntoErrorContext;

    /// Converts the error and catches panics raised while polling.
    fn attempt(self) -> AttemptFuture<Self>;

    /// Resolves to a cancellation failure if `signal` completes first.
    ///
    /// ```rust
    /// use step_rail::prelude_async::*;
    ///
    /// async fn example() {
    ///     let never = std::future::pending::<Result<u32, &str>>();
    ///     let err = never.cancel_on(std::future::ready(())).await.unwrap_err();
    ///     assert!(err.is_cancelled());
    /// }
    /// ```
    fn cancel_on<S>(self, signal: S) -> CancelOn<Self, S>
    where
        S: Future;
}

impl<Fut, T, E> FutureOutcomeExt<T, E> for Fut
where
    Fut: Future<Output = Result<T, E>>,
    E: IntoErrorInfo,
{
    #[inline]
    fn with_ctx<F, C>(self, f: F) -> ContextFuture<Self, F>
    where
        F: FnOnce() -> C,
        C: IntoErrorContext,
    {
        ContextFuture::new(self, f)
    }

    #[inline]
    fn attempt(self) -> AttemptFuture<Self> {
        AttemptFuture::new(self)
    }

    #[inline]
    fn cancel_on<S>(self, signal: S) -> CancelOn<Self, S>
    where
        S: Future,
    {
        CancelOn::new(self, signal)
    }
}
