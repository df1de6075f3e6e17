//! Convenience re-exports for common usage patterns.
//!
//! ```
//! use step_rail::prelude::*;
//!
//! fn load(id: u64) -> Outcome<String> {
//!     std::fs::read_to_string(format!("/nonexistent/person-{id}.json"))
//!         .with_ctx(|| format!("loading person {id}"))
//! }
//!
//! let message = load(3).settle(|body| body, |err| err.error_chain());
//! assert!(message.starts_with("loading person 3 -> "));
//! ```
//!
//! # What's Included
//!
//! - **Macros**: [`context!`], [`step!`]
//! - **Types**: [`ErrorInfo`], [`ErrorContext`], [`Outcome`], [`Rail`], [`Pipeline`], [`NamedStep`]
//! - **Traits**: [`ResultExt`], [`OutcomeExt`], [`IntoErrorContext`], [`IntoErrorInfo`],
//!   [`Step`], [`PipelineContext`]
//! - **Functions**: [`attempt`], [`attempt_value`]

// Macros
pub use crate::{context, step};

// Core types
pub use crate::pipeline::{NamedStep, Pipeline, PipelineContext, Step};
pub use crate::types::{attempt, attempt_value, ErrorContext, ErrorInfo, Outcome, Rail};

// Traits
pub use crate::traits::{IntoErrorContext, IntoErrorInfo, OutcomeExt, ResultExt};
