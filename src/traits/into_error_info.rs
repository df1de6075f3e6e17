//! Conversion of step errors into the single [`ErrorInfo`] failure type.
//!
//! `ErrorInfo` implements [`std::error::Error`] itself, so a blanket
//! `impl<E: Error> From<E>` is impossible. Error types opt in through this trait,
//! usually with the [`impl_error_info!`](crate::impl_error_info) macro.
use std::borrow::Cow;
use std::error::Error;

use crate::types::ErrorInfo;

/// Converts a step's error value into an [`ErrorInfo`].
///
/// # Examples
///
/// ```
/// use step_rail::{impl_error_info, traits::IntoErrorInfo};
///
/// #[derive(Debug)]
/// struct Rejected;
///
/// impl std::fmt::Display for Rejected {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         f.write_str("registration rejected")
///     }
/// }
///
/// impl std::error::Error for Rejected {}
///
/// impl_error_info!(Rejected);
///
/// let info = Rejected.into_error_info();
/// assert_eq!(info.message(), "registration rejected");
/// assert!(info.downcast_source::<Rejected>().is_some());
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be converted into a step failure",
    label = "this type does not implement `IntoErrorInfo`",
    note = "use `impl_error_info!({Self})` for error types, or map the error into `ErrorInfo`"
)]
pub trait IntoErrorInfo {
    fn into_error_info(self) -> ErrorInfo;
}

impl IntoErrorInfo for ErrorInfo {
    #[inline]
    fn into_error_info(self) -> ErrorInfo {
        self
    }
}

impl IntoErrorInfo for &'static str {
    #[inline]
    fn into_error_info(self) -> ErrorInfo {
        ErrorInfo::new(self)
    }
}

impl IntoErrorInfo for String {
    #[inline]
    fn into_error_info(self) -> ErrorInfo {
        ErrorInfo::new(self)
    }
}

impl IntoErrorInfo for Cow<'static, str> {
    #[inline]
    fn into_error_info(self) -> ErrorInfo {
        ErrorInfo::new(self)
    }
}

impl IntoErrorInfo for Box<dyn Error + Send + Sync + 'static> {
    #[inline]
    fn into_error_info(self) -> ErrorInfo {
        ErrorInfo::from_boxed(self)
    }
}

crate::impl_error_info!(std::io::Error);
crate::impl_error_info!(std::fmt::Error);
crate::impl_error_info!(crate::types::Panicked);
crate::impl_error_info!(crate::types::Cancelled);
crate::impl_error_info!(crate::types::TimedOut);
