//! Short-circuiting pipelines over fallible steps.
//!
//! Every step returns an [`Outcome`]: a success payload or an [`ErrorInfo`]
//! describing what went wrong. Steps are chained so that the first failure
//! stops the run and is carried to the end unchanged, apart from the context
//! added on the way out. Panics inside a step are caught and settled as that
//! step's failure.
//!
//! There are two ways to compose steps:
//!
//! - [`Rail`] chains closures fluently, with each stage free to change the
//!   payload type.
//! - [`Pipeline`] holds a list of [`Step`]s over a single context type, built
//!   up front and executed many times.
//!
//! With the `async` feature, [`async_ext`] provides the same two shapes for
//! futures, plus cancellation. [`registration`] is a complete service built on
//! top of the pipeline.
//!
//! # Examples
//!
//! ## Fluent rail
//!
//! ```
//! use step_rail::{context, Rail};
//!
//! let err = Rail::start("lookup", || Err::<u64, _>("person 10 not found"))
//!     .then("register", |id| Ok::<_, &str>(id + 1))
//!     .with_context(context!("registering person {}", 10))
//!     .finish()
//!     .unwrap_err();
//!
//! assert_eq!(err.failed_step(), Some((1, "lookup")));
//! assert!(err.error_chain().contains("person 10 not found"));
//! ```
//!
//! ## Pipeline over a context
//!
//! ```
//! use step_rail::{Outcome, Pipeline};
//!
//! #[derive(Debug, PartialEq)]
//! struct Order { qty: u32, total: u32 }
//!
//! fn price(order: Order) -> Outcome<Order> {
//!     Ok(Order { total: order.qty * 3, ..order })
//! }
//!
//! let pipeline = Pipeline::start("create", |qty: u32| Ok(Order { qty, total: 0 }))
//!     .step(step_rail::step!(price));
//!
//! assert_eq!(pipeline.execute(4), Ok(Order { qty: 4, total: 12 }));
//! assert_eq!(pipeline.step_names(), ["create", "price"]);
//! ```

/// Emits a `tracing` event when the `tracing` feature is enabled.
#[cfg(feature = "tracing")]
macro_rules! rail_trace {
    ($level:ident, $($arg:tt)+) => {
        ::tracing::$level!($($arg)+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! rail_trace {
    ($level:ident, $($arg:tt)+) => {};
}

/// Macros for naming steps and building context
pub mod macros;
/// Sync step and pipeline abstractions
pub mod pipeline;
/// Convenience re-exports for quick starts
pub mod prelude;
/// Person registration built on the pipeline
pub mod registration;
/// Core traits for building and consuming outcomes
pub mod traits;
/// `ErrorInfo`, `Outcome`, `Rail` and friends
pub mod types;

/// Async steps, pipelines and futures (requires `async` feature)
#[cfg(feature = "async")]
pub mod async_ext;

/// Async prelude (requires `async` feature)
#[cfg(feature = "async")]
pub mod prelude_async;

/// Tower `Service` integration (requires `tower` feature)
#[cfg(feature = "tower")]
pub mod tower;

pub use pipeline::{NamedStep, Pipeline, PipelineContext, Step};
pub use traits::*;
pub use types::{
    attempt, attempt_value, error_formatter::ErrorFormatConfig, Cancelled, ErrorContext,
    ErrorInfo, ErrorVec, LazyContext, Outcome, Panicked, Rail, TimedOut,
};
