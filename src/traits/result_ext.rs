//! Combinators on [`Result`] and [`Outcome`].
//!
//! - [`ResultExt`] lifts any `Result<T, E>` whose error converts into
//!   [`ErrorInfo`] into an [`Outcome`], optionally attaching context.
//! - [`OutcomeExt`] adds `bind` and the terminal `settle` matcher.
//!
//! # Examples
//!
//! ```
//! use step_rail::prelude::*;
//!
//! fn half(x: u32) -> Outcome<u32> {
//!     if x % 2 == 0 { Ok(x / 2) } else { Err(ErrorInfo::new(format!("{x} is odd"))) }
//! }
//!
//! let ok = Ok::<_, ErrorInfo>(20).bind(half).bind(half);
//! assert_eq!(ok, Ok(5));
//!
//! let message = Ok::<_, ErrorInfo>(20)
//!     .bind(half)
//!     .bind(half)
//!     .bind(half)
//!     .settle(|v| v.to_string(), |e| e.message().to_string());
//! assert_eq!(message, "5 is odd");
//! ```

use crate::traits::{IntoErrorContext, IntoErrorInfo};
use crate::types::{ErrorInfo, LazyContext, Outcome};

/// Lifts a `Result` into an [`Outcome`].
pub trait ResultExt<T, E> {
    /// Converts the error into an [`ErrorInfo`] without adding context.
    fn into_outcome(self) -> Outcome<T>;

    /// Converts the error and attaches a context entry.
    ///
    /// ```
    /// use step_rail::traits::ResultExt;
    ///
    /// let result: Result<(), &str> = Err("connection reset");
    /// let err = result.ctx("publishing message").unwrap_err();
    /// assert_eq!(err.error_chain(), "publishing message -> connection reset");
    /// ```
    fn ctx<C: IntoErrorContext>(self, context: C) -> Outcome<T>;

    /// Like [`ctx`](ResultExt::ctx), but the message is only built on failure.
    fn with_ctx<F>(self, f: F) -> Outcome<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T, E> for Result<T, E>
where
    E: IntoErrorInfo,
{
    #[inline]
    fn into_outcome(self) -> Outcome<T> {
        self.map_err(IntoErrorInfo::into_error_info)
    }

    #[inline]
    fn ctx<C: IntoErrorContext>(self, context: C) -> Outcome<T> {
        self.map_err(|e| e.into_error_info().with_context(context))
    }

    #[inline]
    fn with_ctx<F>(self, f: F) -> Outcome<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into_error_info().with_context(LazyContext::new(f)))
    }
}

/// Monadic chaining and terminal matching on an [`Outcome`].
pub trait OutcomeExt<T> {
    /// Applies `f` on success and flattens the result. A failure passes through
    /// untouched and `f` is never invoked.
    fn bind<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>;

    /// Consumes the outcome, running exactly one of the two continuations.
    fn settle<R, S, F>(self, on_success: S, on_failure: F) -> R
    where
        S: FnOnce(T) -> R,
        F: FnOnce(ErrorInfo) -> R;

    /// Observes a failure without consuming it.
    fn tap_failure<F>(self, f: F) -> Outcome<T>
    where
        F: FnOnce(&ErrorInfo);
}

impl<T> OutcomeExt<T> for Outcome<T> {
    #[inline]
    fn bind<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        self.and_then(f)
    }

    #[inline]
    fn settle<R, S, F>(self, on_success: S, on_failure: F) -> R
    where
        S: FnOnce(T) -> R,
        F: FnOnce(ErrorInfo) -> R,
    {
        match self {
            Ok(value) => on_success(value),
            Err(err) => on_failure(err),
        }
    }

    #[inline]
    fn tap_failure<F>(self, f: F) -> Outcome<T>
    where
        F: FnOnce(&ErrorInfo),
    {
        if let Err(err) = &self {
            f(err);
        }
        self
    }
}
