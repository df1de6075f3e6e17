//! Data-driven composition of fallible steps.
//!
//! A [`Pipeline`] holds an entry stage that turns the caller's input into a
//! context, followed by an ordered list of [`Step`]s that each consume the
//! context and return a new one. Steps run strictly in order. The first
//! failure stops the run and later steps never execute.
//!
//! # Examples
//!
//! ```
//! use step_rail::{ErrorInfo, Pipeline};
//!
//! let pipeline = Pipeline::start("parse", |raw: &str| {
//!         raw.parse::<i64>().map_err(|e| ErrorInfo::new(e.to_string()))
//!     })
//!     .then("double", |n| Ok(n * 2))
//!     .then("check", |n| if n < 100 { Ok(n) } else { Err("too large".into()) });
//!
//! assert_eq!(pipeline.execute("21"), Ok(42));
//!
//! let err = pipeline.execute("70").unwrap_err();
//! assert_eq!(err.failed_step(), Some((3, "check")));
//!
//! let rendered = pipeline.run_with("x", |n| n.to_string(), |e| e.to_string());
//! assert!(rendered.starts_with("step 1 (parse)"));
//! ```

use std::borrow::Cow;
use std::fmt;

use crate::types::{attempt, ErrorContext, ErrorInfo, Outcome};

/// A single fallible stage that transforms a context into a new context.
pub trait Step<C> {
    /// Stable name used in step markers and traces.
    fn name(&self) -> &str;

    /// Consumes the context and returns the next one, or a failure.
    fn apply(&self, context: C) -> Outcome<C>;
}

/// A closure paired with a step name.
///
/// `NamedStep` implements [`Step`] for `Fn(C) -> Outcome<C>` closures and,
/// with the `async` feature, [`AsyncStep`](crate::async_ext::AsyncStep) for
/// closures returning futures.
#[derive(Clone)]
pub struct NamedStep<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> NamedStep<F> {
    #[inline]
    pub fn new<N: Into<Cow<'static, str>>>(name: N, f: F) -> Self {
        Self { name: name.into(), f }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[cfg(feature = "async")]
    #[inline]
    pub(crate) fn function(&self) -> &F {
        &self.f
    }
}

impl<F> fmt::Debug for NamedStep<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedStep").field("name", &self.name).finish_non_exhaustive()
    }
}

impl<C, F> Step<C> for NamedStep<F>
where
    F: Fn(C) -> Outcome<C>,
{
    #[inline]
    fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    fn apply(&self, context: C) -> Outcome<C> {
        (self.f)(context)
    }
}

/// A context that designates one field as the pipeline's output.
///
/// [`Pipeline::run`] hands `into_output()` to the success continuation.
pub trait PipelineContext {
    type Output;

    fn into_output(self) -> Self::Output;
}

type Entry<I, C> = Box<dyn Fn(I) -> Outcome<C> + Send + Sync>;

/// An ordered, strictly sequential chain of steps.
///
/// `I` is the caller's input type and `C` the context threaded through the
/// steps. [`Pipeline::new`] builds a pipeline whose input already is the
/// context, and an empty one returns its input unchanged.
pub struct Pipeline<I, C> {
    entry: Entry<I, C>,
    entry_name: Option<Cow<'static, str>>,
    steps: Vec<Box<dyn Step<C> + Send + Sync>>,
}

impl<C: 'static> Pipeline<C, C> {
    /// A pipeline with no entry stage: the input is the initial context.
    pub fn new() -> Self {
        Self { entry: Box::new(Ok::<C, ErrorInfo>), entry_name: None, steps: Vec::new() }
    }
}

impl<C: 'static> Default for Pipeline<C, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, C> Pipeline<I, C> {
    /// A pipeline whose first stage builds the context from the input.
    ///
    /// The entry counts as step 1.
    pub fn start<N, F>(name: N, entry: F) -> Self
    where
        N: Into<Cow<'static, str>>,
        F: Fn(I) -> Outcome<C> + Send + Sync + 'static,
    {
        Self { entry: Box::new(entry), entry_name: Some(name.into()), steps: Vec::new() }
    }

    /// Appends a step.
    pub fn step<S>(mut self, step: S) -> Self
    where
        S: Step<C> + Send + Sync + 'static,
    {
        self.steps.push(Box::new(step));
        self
    }

    /// Appends a closure as a named step.
    pub fn then<N, F>(self, name: N, f: F) -> Self
    where
        N: Into<Cow<'static, str>>,
        F: Fn(C) -> Outcome<C> + Send + Sync + 'static,
    {
        self.step(NamedStep::new(name, f))
    }

    /// Number of named stages, counting a named entry.
    pub fn len(&self) -> usize {
        self.steps.len() + usize::from(self.entry_name.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stage names in execution order.
    pub fn step_names(&self) -> Vec<&str> {
        self.entry_name
            .as_deref()
            .into_iter()
            .chain(self.steps.iter().map(|step| step.name()))
            .collect()
    }

    /// Folds the input through every stage and returns the settled outcome.
    ///
    /// A panic inside a stage is caught and becomes that stage's failure.
    pub fn execute(&self, input: I) -> Outcome<C> {
        let mut index = 0;
        let mut context = match &self.entry_name {
            Some(name) => {
                index += 1;
                run_stage(index, name, || (self.entry)(input))?
            },
            None => (self.entry)(input)?,
        };

        for step in &self.steps {
            index += 1;
            context = run_stage(index, step.name(), || step.apply(context))?;
        }

        Ok(context)
    }

    /// Runs the pipeline and passes the context's output to exactly one continuation.
    pub fn run<R, S, F>(&self, input: I, on_success: S, on_failure: F) -> R
    where
        C: PipelineContext,
        S: FnOnce(C::Output) -> R,
        F: FnOnce(ErrorInfo) -> R,
    {
        self.run_with(input, |context| on_success(context.into_output()), on_failure)
    }

    /// Like [`run`](Pipeline::run), but the success continuation gets the whole context.
    pub fn run_with<R, S, F>(&self, input: I, on_success: S, on_failure: F) -> R
    where
        S: FnOnce(C) -> R,
        F: FnOnce(ErrorInfo) -> R,
    {
        match self.execute(input) {
            Ok(context) => {
                rail_trace!(debug, stages = self.len(), "pipeline settled with success");
                on_success(context)
            },
            Err(err) => {
                rail_trace!(warn, error = %err, "pipeline settled with failure");
                on_failure(err)
            },
        }
    }
}

impl<I, C> fmt::Debug for Pipeline<I, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline").field("steps", &self.step_names()).finish()
    }
}

pub(crate) fn run_stage<C, F>(index: usize, name: &str, f: F) -> Outcome<C>
where
    F: FnOnce() -> Outcome<C>,
{
    rail_trace!(debug, step = index, name = %name, "running step");
    attempt(f)
        .inspect(|_| {
            rail_trace!(debug, step = index, name = %name, "step succeeded");
        })
        .map_err(|err| {
            rail_trace!(warn, step = index, name = %name, error = %err, "step failed");
            err.with_context(ErrorContext::step(index, name.to_owned()))
        })
}
