//! Core traits for building and consuming outcomes.
//!
//! - [`IntoErrorContext`]: values usable as failure annotations
//! - [`IntoErrorInfo`]: error types usable as step failures
//! - [`ResultExt`]: lifts `Result<T, E>` into an [`Outcome`](crate::Outcome)
//! - [`OutcomeExt`]: `bind`, `settle` and `tap_failure`

pub mod into_error_context;
pub mod into_error_info;
pub mod result_ext;

pub use into_error_context::IntoErrorContext;
pub use into_error_info::IntoErrorInfo;
pub use result_ext::{OutcomeExt, ResultExt};
