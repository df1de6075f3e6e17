//! Async prelude: everything in [`prelude`](crate::prelude) plus the async
//! pipeline, rail and future extension.
//!
//! ```
//! use step_rail::prelude_async::*;
//!
//! async fn example() -> Outcome<u32> {
//!     AsyncPipeline::new()
//!         .then("increment", |n: u32| async move { Ok(n + 1) })
//!         .execute(1)
//!         .await
//! }
//! ```

pub use crate::prelude::*;

pub use crate::async_ext::{AsyncPipeline, AsyncRail, AsyncStep, FutureOutcomeExt};

#[cfg(feature = "tracing")]
pub use crate::async_ext::FutureSpanExt;
