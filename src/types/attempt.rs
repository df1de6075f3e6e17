//! Constructing outcomes from code that may fail or panic.
//!
//! Panics raised inside the closure are caught here and turned into a failure
//! whose source is [`Panicked`](crate::Panicked); they never unwind past the call.

use std::panic::{self, AssertUnwindSafe};

use crate::traits::IntoErrorInfo;
use crate::types::{ErrorInfo, Outcome};

/// Runs a fallible closure, capturing both `Err` values and panics as failures.
///
/// # Examples
///
/// ```
/// use step_rail::attempt;
///
/// let parsed = attempt(|| "10".parse::<u64>().map_err(|e| e.to_string()));
/// assert_eq!(parsed, Ok(10));
///
/// let missing = attempt(|| -> Result<u64, &str> { Err("person not found") });
/// assert_eq!(missing.unwrap_err().message(), "person not found");
/// ```
pub fn attempt<T, E, F>(f: F) -> Outcome<T>
where
    F: FnOnce() -> Result<T, E>,
    E: IntoErrorInfo,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result.map_err(IntoErrorInfo::into_error_info),
        Err(payload) => Err(ErrorInfo::from_panic(payload)),
    }
}

/// Runs a closure that does not return a `Result`.
///
/// A pure, non-panicking computation always yields `Ok(value)`.
///
/// ```
/// use step_rail::attempt_value;
///
/// assert_eq!(attempt_value(|| 2 * 21), Ok(42));
/// assert!(attempt_value(|| -> u32 { panic!("boom") }).unwrap_err().is_panic());
/// ```
pub fn attempt_value<T, F>(f: F) -> Outcome<T>
where
    F: FnOnce() -> T,
{
    attempt(|| Ok::<T, ErrorInfo>(f()))
}
