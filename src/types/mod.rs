//! Failure types, the [`Outcome`] alias and the fluent [`Rail`] composer.
//!
//! # Examples
//!
//! ```
//! use step_rail::{ErrorContext, ErrorInfo};
//!
//! let err = ErrorInfo::new("account rejected")
//!     .with_context(ErrorContext::step(2, "register_account"))
//!     .with_context(ErrorContext::tag("social"))
//!     .set_code(409);
//!
//! assert_eq!(
//!     err.error_chain(),
//!     "[social] -> step 2 (register_account) -> account rejected (code: 409)"
//! );
//! ```
use smallvec::SmallVec;

pub mod attempt;
pub mod error_context;
pub mod error_formatter;
pub mod error_info;
pub mod lazy_context;
pub mod rail;

pub use attempt::*;
pub use error_context::*;
pub use error_info::*;
pub use lazy_context::*;
pub use rail::*;

/// SmallVec-backed collection used for context stacks.
///
/// Most failures carry one step marker and maybe one extra note, so two
/// entries live inline.
pub type ErrorVec<E> = SmallVec<[E; 2]>;

/// The result of every step: a success payload or a captured [`ErrorInfo`].
///
/// `map` and `and_then` come from [`Result`]; `bind` and `settle` come from
/// [`OutcomeExt`](crate::traits::OutcomeExt).
pub type Outcome<T> = Result<T, ErrorInfo>;
