//! Conversion of plain values into [`ErrorContext`] entries.
//!
//! ```
//! use step_rail::{traits::IntoErrorContext, ErrorContext};
//!
//! assert_eq!("loading person".into_error_context().message(), "loading person");
//! assert_eq!(ErrorContext::tag("social").into_error_context().message(), "[social]");
//! ```
use std::borrow::Cow;

use crate::types::error_context::ErrorContext;

/// Converts a type into an [`ErrorContext`] for failure annotation.
///
/// Implement it manually for domain types that describe where a failure happened:
///
/// ```
/// use step_rail::{traits::IntoErrorContext, ErrorContext};
///
/// struct PersonRef(u64);
///
/// impl IntoErrorContext for PersonRef {
///     fn into_error_context(self) -> ErrorContext {
///         ErrorContext::metadata("person_id", self.0.to_string())
///     }
/// }
///
/// assert_eq!(PersonRef(10).into_error_context().message(), "person_id=10");
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as error context",
    label = "this type does not implement `IntoErrorContext`",
    note = "wrap a closure in `LazyContext` or use the `context!` macro"
)]
pub trait IntoErrorContext {
    fn into_error_context(self) -> ErrorContext;
}

impl IntoErrorContext for String {
    #[inline]
    fn into_error_context(self) -> ErrorContext {
        ErrorContext::new(self)
    }
}

impl IntoErrorContext for &'static str {
    #[inline]
    fn into_error_context(self) -> ErrorContext {
        ErrorContext::new(self)
    }
}

impl IntoErrorContext for Cow<'static, str> {
    #[inline]
    fn into_error_context(self) -> ErrorContext {
        ErrorContext::new(self)
    }
}

impl IntoErrorContext for ErrorContext {
    #[inline]
    fn into_error_context(self) -> ErrorContext {
        self
    }
}
