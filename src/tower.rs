//! Tower integration.
//!
//! - [`PipelineService`] serves an [`AsyncPipeline`] as a [`Service`].
//! - [`ServiceStep`] runs a [`Service`] as one step of a pipeline.
//!
//! # Feature Flag
//!
//! Requires the `tower` feature.
//!
//! # Example
//!
//! ```rust
//! use step_rail::async_ext::AsyncPipeline;
//! use step_rail::tower::PipelineService;
//! use tower::ServiceExt;
//!
//! async fn example() {
//!     let pipeline = AsyncPipeline::start("parse", |raw: String| async move {
//!         raw.parse::<u32>().map_err(|e| step_rail::ErrorInfo::new(e.to_string()))
//!     });
//!     let service = PipelineService::new(pipeline);
//!     assert_eq!(service.oneshot("7".to_owned()).await, Ok(7));
//! }
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::future::BoxFuture;
use tower::util::ServiceExt;
use tower::{BoxError, Service};

use crate::async_ext::{AsyncPipeline, AsyncStep, StepFuture};
use crate::types::{ErrorInfo, Outcome};

/// A [`Service`] that executes an [`AsyncPipeline`] per request.
///
/// The pipeline is shared, so cloning the service is cheap and every clone
/// serves requests concurrently.
pub struct PipelineService<I, C> {
    pipeline: Arc<AsyncPipeline<I, C>>,
}

impl<I, C> PipelineService<I, C> {
    #[inline]
    pub fn new(pipeline: AsyncPipeline<I, C>) -> Self {
        Self { pipeline: Arc::new(pipeline) }
    }

    #[inline]
    pub fn from_shared(pipeline: Arc<AsyncPipeline<I, C>>) -> Self {
        Self { pipeline }
    }

    #[inline]
    pub fn pipeline(&self) -> &AsyncPipeline<I, C> {
        &self.pipeline
    }
}

impl<I, C> Clone for PipelineService<I, C> {
    fn clone(&self) -> Self {
        Self { pipeline: Arc::clone(&self.pipeline) }
    }
}

impl<I, C> fmt::Debug for PipelineService<I, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineService").field("pipeline", &self.pipeline).finish()
    }
}

impl<I, C> Service<I> for PipelineService<I, C>
where
    I: Send + 'static,
    C: Send + 'static,
{
    type Response = C;
    type Error = ErrorInfo;
    type Future = BoxFuture<'static, Outcome<C>>;

    #[inline]
    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, input: I) -> Self::Future {
        let pipeline = Arc::clone(&self.pipeline);
        Box::pin(async move { pipeline.execute(input).await })
    }
}

/// Runs a [`Service`] whose response is the next context as a named step.
///
/// Each application clones the service and drives it with `oneshot`, so the
/// service's readiness is honored. Its errors become the step's failure.
#[derive(Clone)]
pub struct ServiceStep<S> {
    name: Cow<'static, str>,
    service: S,
}

impl<S> ServiceStep<S> {
    #[inline]
    pub fn new<N: Into<Cow<'static, str>>>(name: N, service: S) -> Self {
        Self { name: name.into(), service }
    }
}

impl<S> fmt::Debug for ServiceStep<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceStep").field("name", &self.name).finish_non_exhaustive()
    }
}

impl<S, C> AsyncStep<C> for ServiceStep<S>
where
    S: Service<C, Response = C> + Clone + Send + Sync + 'static,
    S::Error: Into<BoxError>,
    S::Future: Send + 'static,
    C: Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, context: C) -> StepFuture<C> {
        let service = self.service.clone();
        Box::pin(async move {
            service.oneshot(context).await.map_err(|err| service_failure(err.into()))
        })
    }
}

fn service_failure(err: BoxError) -> ErrorInfo {
    match err.downcast::<ErrorInfo>() {
        Ok(info) => *info,
        Err(other) => ErrorInfo::from_boxed(other),
    }
}
