//! Span-aware failure context.
//!
//! Attaches the name of the active `tracing` span to a failure, so a step
//! that fails inside an instrumented region says where it was running.
//!
//! Requires the `tracing` feature.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use pin_project_lite::pin_project;
use tracing::Span;

use crate::traits::IntoErrorInfo;
use crate::types::{ErrorContext, ErrorInfo, Outcome};

/// Adds span context to a future's failure.
///
/// # Example
///
/// ```rust
/// use step_rail::async_ext::FutureSpanExt;
/// use tracing::Instrument;
///
/// async fn publish() -> Result<(), &'static str> {
///     Err("rate limited")
/// }
///
/// async fn example() {
///     let span = tracing::info_span!("publish_tweet");
///     let _ = publish().with_span(span.clone()).instrument(span).await;
/// }
/// ```
pub trait FutureSpanExt<T, E>: Future<Output = Result<T, E>> + Sized {
    /// Captures the current span and tags a failure with it.
    fn with_span_context(self) -> SpanContextFuture<Self> {
        SpanContextFuture { inner: self, span: Span::current() }
    }

    /// Tags a failure with the given span instead of the current one.
    fn with_span(self, span: Span) -> SpanContextFuture<Self> {
        SpanContextFuture { inner: self, span }
    }
}

impl<F, T, E> FutureSpanExt<T, E> for F where F: Future<Output = Result<T, E>> {}

pin_project! {
    /// Created by [`FutureSpanExt::with_span_context`] or [`FutureSpanExt::with_span`].
    #[must_use = "futures do nothing unless polled"]
    pub struct SpanContextFuture<F> {
        #[pin]
        inner: F,
        span: Span,
    }
}

impl<F, T, E> Future for SpanContextFuture<F>
where
    F: Future<Output = Result<T, E>>,
    E: IntoErrorInfo,
{
    type Output = Outcome<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let span = this.span;

        this.inner
            .poll(cx)
            .map(|res| res.map_err(|err| err.into_error_info().with_context(span_context(span))))
    }
}

fn span_context(span: &Span) -> ErrorContext {
    let name = span.metadata().map(|m| m.name()).unwrap_or("unknown");
    ErrorContext::new(format!("in span '{name}'"))
}

/// Adds span context to a `Result`'s failure.
pub trait ResultSpanExt<T, E> {
    /// ```rust
    /// use step_rail::async_ext::ResultSpanExt;
    ///
    /// let span = tracing::info_span!("lookup");
    /// let err = Err::<(), _>("not found").with_span(&span).unwrap_err();
    /// assert!(err.error_chain().ends_with("not found"));
    /// ```
    fn with_current_span(self) -> Outcome<T>;

    fn with_span(self, span: &Span) -> Outcome<T>;
}

impl<T, E> ResultSpanExt<T, E> for Result<T, E>
where
    E: IntoErrorInfo,
{
    fn with_current_span(self) -> Outcome<T> {
        self.with_span(&Span::current())
    }

    fn with_span(self, span: &Span) -> Outcome<T> {
        self.map_err(|err| err.into_error_info().with_context(span_context(span)))
    }
}

/// Converts an error and tags it with the current span.
pub fn instrument_error<E>(error: E) -> ErrorInfo
where
    E: IntoErrorInfo,
{
    error.into_error_info().with_context(span_context(&Span::current()))
}
