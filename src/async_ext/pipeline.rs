//! Async counterpart of [`Pipeline`](crate::Pipeline).
//!
//! Steps return boxed futures and are awaited strictly one after another;
//! the next step starts only after the previous one resolved with success.

use std::borrow::Cow;
use std::fmt;
use std::future::{self, Future};
use std::panic::{self, AssertUnwindSafe};
use std::pin::pin;

use futures_core::future::BoxFuture;

use crate::pipeline::{NamedStep, PipelineContext};
use crate::traits::IntoErrorInfo;
use crate::types::{ErrorContext, ErrorInfo, Outcome};

use super::context_future::AttemptFuture;
use super::future_ext::FutureOutcomeExt;

/// Future returned by an [`AsyncStep`].
pub type StepFuture<C> = BoxFuture<'static, Outcome<C>>;

/// A single asynchronous stage.
pub trait AsyncStep<C>: Send + Sync {
    fn name(&self) -> &str;

    fn apply(&self, context: C) -> StepFuture<C>;
}

impl<C, F, Fut> AsyncStep<C> for NamedStep<F>
where
    F: Fn(C) -> Fut + Send + Sync,
    Fut: Future<Output = Outcome<C>> + Send + 'static,
{
    #[inline]
    fn name(&self) -> &str {
        NamedStep::name(self)
    }

    #[inline]
    fn apply(&self, context: C) -> StepFuture<C> {
        Box::pin((self.function())(context))
    }
}

type AsyncEntry<I, C> = Box<dyn Fn(I) -> StepFuture<C> + Send + Sync>;

/// An ordered chain of asynchronous steps.
///
/// # Examples
///
/// ```
/// use step_rail::async_ext::AsyncPipeline;
///
/// async fn example() {
///     let pipeline = AsyncPipeline::start("load", |id: u64| async move { Ok(id * 10) })
///         .then("check", |n| async move {
///             if n > 0 { Ok(n) } else { Err("empty".into()) }
///         });
///
///     assert_eq!(pipeline.execute(4).await, Ok(40));
///     let err = pipeline.execute(0).await.unwrap_err();
///     assert_eq!(err.failed_step(), Some((2, "check")));
/// }
/// ```
pub struct AsyncPipeline<I, C> {
    entry: AsyncEntry<I, C>,
    entry_name: Option<Cow<'static, str>>,
    steps: Vec<Box<dyn AsyncStep<C>>>,
}

impl<C: Send + 'static> AsyncPipeline<C, C> {
    /// A pipeline with no entry stage: the input is the initial context.
    pub fn new() -> Self {
        Self {
            entry: Box::new(|context| Box::pin(future::ready(Ok(context)))),
            entry_name: None,
            steps: Vec::new(),
        }
    }
}

impl<C: Send + 'static> Default for AsyncPipeline<C, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, C> AsyncPipeline<I, C> {
    /// A pipeline whose first stage builds the context from the input.
    ///
    /// The entry counts as step 1.
    pub fn start<N, F, Fut>(name: N, entry: F) -> Self
    where
        N: Into<Cow<'static, str>>,
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Outcome<C>> + Send + 'static,
    {
        Self {
            entry: Box::new(move |input| Box::pin(entry(input))),
            entry_name: Some(name.into()),
            steps: Vec::new(),
        }
    }

    pub fn step<S>(mut self, step: S) -> Self
    where
        S: AsyncStep<C> + 'static,
    {
        self.steps.push(Box::new(step));
        self
    }

    /// Appends an async closure as a named step.
    pub fn then<N, F, Fut>(self, name: N, f: F) -> Self
    where
        N: Into<Cow<'static, str>>,
        F: Fn(C) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Outcome<C>> + Send + 'static,
    {
        self.step(NamedStep::new(name, f))
    }

    pub fn len(&self) -> usize {
        self.steps.len() + usize::from(self.entry_name.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.entry_name
            .as_deref()
            .into_iter()
            .chain(self.steps.iter().map(|step| step.name()))
            .collect()
    }

    /// Awaits every stage in order and returns the settled outcome.
    ///
    /// Panics raised while building or polling a stage become that stage's failure.
    pub async fn execute(&self, input: I) -> Outcome<C> {
        self.execute_until(input, future::pending::<()>()).await
    }

    /// Like [`execute`](AsyncPipeline::execute), but the running stage fails
    /// with a [`Cancelled`](crate::Cancelled) cause as soon as `signal`
    /// completes. The failure carries that stage's step marker and no later
    /// stage runs.
    ///
    /// ```
    /// use std::time::Duration;
    /// use step_rail::async_ext::AsyncPipeline;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let pipeline = AsyncPipeline::new()
    ///     .then("load", |n: u32| async move { Ok(n) })
    ///     .then("wait", |_: u32| std::future::pending());
    ///
    /// let deadline = tokio::time::sleep(Duration::from_millis(10));
    /// let err = pipeline.execute_until(1, deadline).await.unwrap_err();
    /// assert!(err.is_cancelled());
    /// assert_eq!(err.failed_step(), Some((2, "wait")));
    /// # }
    /// ```
    pub async fn execute_until<S>(&self, input: I, signal: S) -> Outcome<C>
    where
        S: Future,
    {
        let mut signal = pin!(signal);
        let mut index = 0;

        let entry_signal = signal.as_mut();
        let mut context = match &self.entry_name {
            Some(name) => {
                index += 1;
                run_async_stage(index, name, move || (self.entry)(input).cancel_on(entry_signal))
                    .await?
            },
            None => (self.entry)(input).cancel_on(entry_signal).await?,
        };

        for step in &self.steps {
            index += 1;
            let stage_signal = signal.as_mut();
            context =
                run_async_stage(index, step.name(), move || step.apply(context).cancel_on(stage_signal))
                    .await?;
        }

        Ok(context)
    }

    /// Runs the pipeline and passes the context's output to exactly one continuation.
    pub async fn run<R, S, F>(&self, input: I, on_success: S, on_failure: F) -> R
    where
        C: PipelineContext,
        S: FnOnce(C::Output) -> R,
        F: FnOnce(ErrorInfo) -> R,
    {
        self.run_with(input, |context| on_success(context.into_output()), on_failure).await
    }

    pub async fn run_with<R, S, F>(&self, input: I, on_success: S, on_failure: F) -> R
    where
        S: FnOnce(C) -> R,
        F: FnOnce(ErrorInfo) -> R,
    {
        match self.execute(input).await {
            Ok(context) => {
                rail_trace!(debug, stages = self.len(), "async pipeline settled with success");
                on_success(context)
            },
            Err(err) => {
                rail_trace!(warn, error = %err, "async pipeline settled with failure");
                on_failure(err)
            },
        }
    }
}

impl<I, C> fmt::Debug for AsyncPipeline<I, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncPipeline").field("steps", &self.step_names()).finish()
    }
}

/// Builds and awaits one stage, tagging a failure with its step marker.
pub(crate) async fn run_async_stage<T, E, Fut, F>(index: usize, name: &str, make: F) -> Outcome<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: IntoErrorInfo,
{
    rail_trace!(debug, step = index, name = %name, "running async step");
    let outcome = match panic::catch_unwind(AssertUnwindSafe(make)) {
        Ok(future) => AttemptFuture::new(future).await,
        Err(payload) => Err(ErrorInfo::from_panic(payload)),
    };

    outcome
        .inspect(|_| {
            rail_trace!(debug, step = index, name = %name, "async step succeeded");
        })
        .map_err(|err| {
            rail_trace!(warn, step = index, name = %name, error = %err, "async step failed");
            err.with_context(ErrorContext::step(index, name.to_owned()))
        })
}
