//! Async steps and pipelines.
//!
//! The same rules as the sync core apply: stages run one at a time, the first
//! failure stops the run, and panics raised while a stage is polled become
//! failures instead of unwinding into the caller. In addition, a stage can be
//! cancelled, which settles the run as a [`Cancelled`](crate::Cancelled) failure.
//!
//! # Feature Flag
//!
//! Requires the `async` feature (enabled by default). [`spawn_step`] and
//! [`step_timeout`] need `async-tokio`.
//!
//! # Examples
//!
//! ```
//! use step_rail::prelude_async::*;
//!
//! async fn fetch(id: u64) -> Result<String, &'static str> {
//!     if id == 0 { Err("no such person") } else { Ok(format!("person-{id}")) }
//! }
//!
//! async fn example() {
//!     let err = fetch(0).ctx("loading person 0").await.unwrap_err();
//!     assert_eq!(err.error_chain(), "loading person 0 -> no such person");
//! }
//! ```

mod context_future;
mod future_ext;
mod pipeline;
mod rail;

#[cfg(feature = "async-tokio")]
mod tokio_ext;

#[cfg(feature = "tracing")]
mod tracing_ext;

pub use context_future::{AttemptFuture, CancelOn, ContextFuture};
pub use future_ext::FutureOutcomeExt;
pub use pipeline::{AsyncPipeline, AsyncStep, StepFuture};
pub use rail::AsyncRail;

#[cfg(feature = "async-tokio")]
pub use tokio_ext::{spawn_step, step_timeout, StepHandle};

#[cfg(feature = "tracing")]
pub use tracing_ext::{instrument_error, FutureSpanExt, ResultSpanExt, SpanContextFuture};
