//! Shortcuts for naming steps and building failure context.
//!
//! - [`macro@crate::context`] defers formatting until a failure needs the text.
//! - [`macro@crate::step`] names a step after the function that implements it.
//! - [`macro@crate::impl_error_info`] lets an error type become a step failure.
//!
//! # Examples
//!
//! ```
//! use step_rail::{context, step, Outcome, Pipeline};
//!
//! fn double(x: u32) -> Outcome<u32> {
//!     Ok(x * 2)
//! }
//!
//! let pipeline = Pipeline::new().step(step!(double)).step(step!(double));
//! assert_eq!(pipeline.execute(3), Ok(12));
//!
//! let err = Pipeline::<u32, u32>::new()
//!     .then("reject", |_| Err("rejected".into()))
//!     .execute(1)
//!     .map_err(|e| e.with_context(context!("request {}", 7)))
//!     .unwrap_err();
//! assert!(err.error_chain().starts_with("request 7"));
//! ```

/// Creates a lazily-evaluated context entry from `format!` arguments.
///
/// ```
/// use step_rail::{context, ErrorInfo};
///
/// let person_id = 42;
/// let err = ErrorInfo::new("lookup failed").with_context(context!("person {}", person_id));
/// assert_eq!(err.error_chain(), "person 42 -> lookup failed");
/// ```
#[macro_export]
macro_rules! context {
    ($($arg:tt)*) => {
        $crate::types::LazyContext::new(move || format!($($arg)*))
    };
}

/// Wraps a function or closure in a [`NamedStep`](crate::pipeline::NamedStep).
///
/// `step!(path)` uses the last path segment as the step name;
/// `step!("name", expr)` names it explicitly.
#[macro_export]
macro_rules! step {
    ($name:literal, $f:expr $(,)?) => {
        $crate::pipeline::NamedStep::new($name, $f)
    };
    ($($segment:ident)::+ $(,)?) => {
        $crate::pipeline::NamedStep::new(
            $crate::__last_segment!($($segment)::+),
            $($segment)::+,
        )
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __last_segment {
    ($last:ident) => {
        stringify!($last)
    };
    ($head:ident :: $($tail:ident)::+) => {
        $crate::__last_segment!($($tail)::+)
    };
}

/// Implements [`IntoErrorInfo`](crate::traits::IntoErrorInfo) for an error type.
///
/// The type must implement `std::error::Error + Send + Sync + 'static`. The
/// value is kept as the failure's source, so callers can downcast it later.
///
/// ```
/// use step_rail::{impl_error_info, attempt};
///
/// #[derive(Debug)]
/// struct NotFound(u64);
///
/// impl std::fmt::Display for NotFound {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "person {} not found", self.0)
///     }
/// }
///
/// impl std::error::Error for NotFound {}
///
/// impl_error_info!(NotFound);
///
/// let err = attempt(|| -> Result<(), NotFound> { Err(NotFound(10)) }).unwrap_err();
/// assert_eq!(err.downcast_source::<NotFound>().map(|e| e.0), Some(10));
/// ```
#[macro_export]
macro_rules! impl_error_info {
    ($($type:ty),+ $(,)?) => {
        $(
            impl $crate::traits::IntoErrorInfo for $type {
                fn into_error_info(self) -> $crate::types::ErrorInfo {
                    $crate::types::ErrorInfo::from_error(self)
                }
            }
        )+
    };
}
