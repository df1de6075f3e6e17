//! The single failure type carried by every [`Outcome`](crate::types::Outcome).
//!
//! [`ErrorInfo`] wraps whatever went wrong inside a step:
//! - a human-readable message
//! - the underlying error as an optional, shareable source (with its own `source()` chain)
//! - a stack of [`ErrorContext`] entries pushed while the failure travelled outward
//! - an optional numeric code
//!
//! The pipeline core never branches on the kind of failure. Callers that need to
//! tell a missing record from a cancelled request inspect the source with
//! [`ErrorInfo::downcast_source`].

use std::any::Any;
use std::borrow::Cow;
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::traits::IntoErrorContext;
use crate::types::error_formatter::ErrorFormatBuilder;
use crate::types::{ErrorContext, ErrorVec};

mod causes;
mod traits;

pub use causes::{Cancelled, Panicked, TimedOut};

/// Shared handle to the underlying cause of a failure.
pub type SharedSource = Arc<dyn Error + Send + Sync + 'static>;

/// A captured failure: message, optional source error, context stack and code.
///
/// # Examples
///
/// ```
/// use step_rail::{ErrorContext, ErrorInfo};
///
/// let err = ErrorInfo::new("person 10 not found")
///     .with_context(ErrorContext::step(1, "create_context"))
///     .set_code(404);
///
/// assert_eq!(err.failed_step(), Some((1, "create_context")));
/// assert_eq!(err.to_string(), "step 1 (create_context) -> person 10 not found (code: 404)");
/// ```
#[must_use]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    pub(crate) message: Cow<'static, str>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) source: Option<SharedSource>,
    pub(crate) context: ErrorVec<ErrorContext>,
    pub(crate) code: Option<u32>,
}

impl ErrorInfo {
    /// Creates a failure from a bare message, with no source error.
    #[inline]
    pub fn new<S: Into<Cow<'static, str>>>(message: S) -> Self {
        Self { message: message.into(), source: None, context: ErrorVec::new(), code: None }
    }

    /// Wraps an error value. Its `Display` output becomes the message.
    pub fn from_error<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            message: Cow::Owned(error.to_string()),
            source: Some(Arc::new(error)),
            context: ErrorVec::new(),
            code: None,
        }
    }

    /// Wraps a boxed trait-object error.
    pub fn from_boxed(error: Box<dyn Error + Send + Sync + 'static>) -> Self {
        Self {
            message: Cow::Owned(error.to_string()),
            source: Some(Arc::from(error)),
            context: ErrorVec::new(),
            code: None,
        }
    }

    /// Uses `message` as the description and keeps `source` as the cause.
    pub fn with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<Cow<'static, str>>,
        E: Error + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            source: Some(Arc::new(source)),
            context: ErrorVec::new(),
            code: None,
        }
    }

    /// A failure whose cause is a host-side cancellation.
    #[inline]
    pub fn cancelled() -> Self {
        Self::from_error(Cancelled)
    }

    /// A failure whose cause is an elapsed deadline.
    #[inline]
    pub fn timed_out(after: Duration) -> Self {
        Self::from_error(TimedOut(after))
    }

    /// Converts a panic payload captured by `catch_unwind` into a failure.
    pub fn from_panic(payload: Box<dyn Any + Send + 'static>) -> Self {
        Self::from_error(Panicked::from_payload(payload))
    }

    /// Pushes one context entry.
    #[inline]
    pub fn with_context<C>(mut self, ctx: C) -> Self
    where
        C: IntoErrorContext,
    {
        self.context.push(ctx.into_error_context());
        self
    }

    /// Pushes several context entries in iteration order.
    #[inline]
    pub fn with_contexts<I>(mut self, contexts: I) -> Self
    where
        I: IntoIterator<Item = ErrorContext>,
    {
        self.context.extend(contexts);
        self
    }

    /// Sets (or overrides) the error code.
    #[inline]
    pub fn set_code(mut self, code: u32) -> Self {
        self.code = Some(code);
        self
    }

    #[inline]
    pub fn code(&self) -> Option<u32> {
        self.code
    }

    /// The failure's own description, without context.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The wrapped cause, if the failure was built from an error value.
    #[inline]
    pub fn source_error(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    /// Borrows the wrapped cause as a concrete type.
    ///
    /// ```
    /// use step_rail::{ErrorInfo, Cancelled};
    ///
    /// let err = ErrorInfo::cancelled();
    /// assert!(err.downcast_source::<Cancelled>().is_some());
    /// ```
    #[inline]
    pub fn downcast_source<E>(&self) -> Option<&E>
    where
        E: Error + 'static,
    {
        self.source.as_deref().and_then(|source| source.downcast_ref::<E>())
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.downcast_source::<Cancelled>().is_some()
    }

    #[inline]
    pub fn is_panic(&self) -> bool {
        self.downcast_source::<Panicked>().is_some()
    }

    #[inline]
    pub fn is_timeout(&self) -> bool {
        self.downcast_source::<TimedOut>().is_some()
    }

    /// Walks the cause chain, starting with the wrapped source.
    pub fn causes(&self) -> impl Iterator<Item = &(dyn Error + 'static)> {
        let first = self.source.as_deref().map(|e| e as &(dyn Error + 'static));
        std::iter::successors(first, |&e| e.source())
    }

    /// Returns the context stack in LIFO order (most recent first).
    pub fn context(&self) -> ErrorVec<ErrorContext> {
        self.context.iter().rev().cloned().collect()
    }

    /// Borrowing iterator over the contexts in LIFO order.
    #[inline]
    pub fn context_iter(&self) -> std::iter::Rev<std::slice::Iter<'_, ErrorContext>> {
        self.context.iter().rev()
    }

    /// The step marker closest to where the failure was raised.
    pub fn failed_step(&self) -> Option<(usize, &str)> {
        self.context.iter().find_map(ErrorContext::as_step)
    }

    /// Returns a builder for customizing how the failure renders.
    #[must_use]
    #[inline]
    pub fn fmt(&self) -> ErrorFormatBuilder<'_> {
        ErrorFormatBuilder::new(self)
    }

    /// Formats the failure using a closure to configure the builder.
    #[must_use]
    pub fn format_with<F>(&self, f: F) -> String
    where
        F: FnOnce(ErrorFormatBuilder<'_>) -> ErrorFormatBuilder<'_>,
    {
        f(self.fmt()).to_string()
    }

    /// Contexts, message and code rendered on one line.
    #[must_use]
    pub fn error_chain(&self) -> String {
        self.fmt().to_string()
    }
}
