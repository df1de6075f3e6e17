use std::borrow::Cow;

use crate::traits::{IntoErrorContext, IntoErrorInfo};
use crate::types::{attempt, ErrorContext, ErrorVec, Outcome};

/// A fluent, statically-typed chain of fallible steps.
///
/// `Rail` carries an [`Outcome`] from one stage to the next. Once a stage
/// fails, every later stage is skipped and the first failure is kept.
///
/// Named stages added with [`then`](Rail::then) are numbered from 1. A failing
/// stage gets a step marker, and a panic inside it is caught and recorded as
/// that stage's failure. Contexts added with [`with_context`](Rail::with_context)
/// are only materialized when the rail ends in a failure.
///
/// # Examples
///
/// ```
/// use step_rail::Rail;
///
/// let url = Rail::start("lookup", || Ok::<_, &str>(10_u64))
///     .then("register", |id| Ok::<_, &str>(format!("account-{id}")))
///     .then("publish", |account| Ok::<_, &str>(format!("https://social.example/{account}")))
///     .settle(|url| url, |_| String::new());
///
/// assert_eq!(url, "https://social.example/account-10");
/// ```
#[must_use]
pub struct Rail<T> {
    outcome: Outcome<T>,
    pending_contexts: ErrorVec<ErrorContext>,
    stage: usize,
}

impl<T> Rail<T> {
    /// Wraps an existing result. No stage is counted.
    #[inline]
    pub fn new<E>(result: Result<T, E>) -> Self
    where
        E: IntoErrorInfo,
    {
        Self {
            outcome: result.map_err(IntoErrorInfo::into_error_info),
            pending_contexts: ErrorVec::new(),
            stage: 0,
        }
    }

    /// Starts a rail from an already-available value.
    #[inline]
    pub fn success(value: T) -> Self {
        Self { outcome: Ok(value), pending_contexts: ErrorVec::new(), stage: 0 }
    }

    /// Starts a rail by running its first named stage.
    pub fn start<N, E, F>(name: N, f: F) -> Self
    where
        N: Into<Cow<'static, str>>,
        F: FnOnce() -> Result<T, E>,
        E: IntoErrorInfo,
    {
        Rail::success(()).then(name, |()| f())
    }

    /// Adds a context entry that is attached if the rail ends in a failure.
    ///
    /// On a successful rail this is a no-op.
    #[inline]
    pub fn with_context<C>(mut self, context: C) -> Self
    where
        C: IntoErrorContext,
    {
        if self.outcome.is_err() {
            self.pending_contexts.push(context.into_error_context());
        }
        self
    }

    /// Runs the next named stage if every previous stage succeeded.
    pub fn then<U, N, E, F>(self, name: N, f: F) -> Rail<U>
    where
        N: Into<Cow<'static, str>>,
        F: FnOnce(T) -> Result<U, E>,
        E: IntoErrorInfo,
    {
        let stage = self.stage + 1;
        let outcome = match self.outcome {
            Ok(value) => {
                let name = name.into();
                rail_trace!(debug, step = stage, name = %name, "running step");
                attempt(|| f(value))
                    .inspect(|_| {
                        rail_trace!(debug, step = stage, name = %name, "step succeeded");
                    })
                    .map_err(|err| {
                        rail_trace!(warn, step = stage, name = %name, error = %err, "step failed");
                        err.with_context(ErrorContext::step(stage, name))
                    })
            },
            Err(err) => Err(err),
        };
        Rail { outcome, pending_contexts: self.pending_contexts, stage }
    }

    /// Chains an outcome-returning function on the success value.
    ///
    /// Unlike [`then`](Rail::then), the stage is neither counted nor marked.
    #[inline]
    pub fn bind<U, F>(self, f: F) -> Rail<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        Rail {
            outcome: self.outcome.and_then(f),
            pending_contexts: self.pending_contexts,
            stage: self.stage,
        }
    }

    /// Transforms the success value. `f` never runs on a failure.
    #[inline]
    pub fn map<U, F>(self, f: F) -> Rail<U>
    where
        F: FnOnce(T) -> U,
    {
        Rail {
            outcome: self.outcome.map(f),
            pending_contexts: self.pending_contexts,
            stage: self.stage,
        }
    }

    /// Number of named stages chained so far, executed or skipped.
    #[inline]
    pub fn stages(&self) -> usize {
        self.stage
    }

    #[inline]
    pub fn is_failure(&self) -> bool {
        self.outcome.is_err()
    }

    /// Settles the rail into an [`Outcome`], attaching pending contexts to a failure.
    #[inline]
    pub fn finish(self) -> Outcome<T> {
        let pending = self.pending_contexts;
        self.outcome.map_err(|err| err.with_contexts(pending))
    }

    /// Settles the rail and hands the result to exactly one continuation.
    #[inline]
    pub fn settle<R, S, F>(self, on_success: S, on_failure: F) -> R
    where
        S: FnOnce(T) -> R,
        F: FnOnce(crate::ErrorInfo) -> R,
    {
        match self.finish() {
            Ok(value) => on_success(value),
            Err(err) => on_failure(err),
        }
    }
}

impl<T> From<Rail<T>> for Outcome<T> {
    #[inline]
    fn from(rail: Rail<T>) -> Self {
        rail.finish()
    }
}
