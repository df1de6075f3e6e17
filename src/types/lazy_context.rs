//! Deferred context generation.
//!
//! [`LazyContext`] holds a closure that builds the context string only when a
//! failure actually needs it, so the success path never pays for formatting.
//!
//! # Examples
//!
//! ```
//! use step_rail::{LazyContext, Rail};
//!
//! let id = 42;
//! let outcome = Rail::new(Err::<(), _>("lookup failed"))
//!     .with_context(LazyContext::new(move || format!("person {}", id)))
//!     .finish();
//!
//! assert!(outcome.unwrap_err().error_chain().contains("person 42"));
//! ```
use crate::{traits::IntoErrorContext, types::error_context::ErrorContext};

/// A lazily-evaluated error context.
///
/// # Examples
///
/// ```
/// use step_rail::LazyContext;
///
/// let lazy = LazyContext::new(|| format!("account: {}", "9"));
/// // nothing is formatted until the context is consumed
/// ```
#[repr(transparent)]
pub struct LazyContext<F> {
    generator: F,
}

impl<F> LazyContext<F> {
    #[inline]
    pub fn new(generator: F) -> Self {
        Self { generator }
    }
}

impl<F> IntoErrorContext for LazyContext<F>
where
    F: FnOnce() -> String,
{
    #[inline]
    fn into_error_context(self) -> ErrorContext {
        ErrorContext::new((self.generator)())
    }
}
