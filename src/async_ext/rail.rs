//! Async counterpart of [`Rail`](crate::Rail).

use std::borrow::Cow;
use std::future::{self, Future, Ready};

use crate::traits::{IntoErrorContext, IntoErrorInfo};
use crate::types::{ErrorInfo, Outcome};

use super::future_ext::FutureOutcomeExt;
use super::pipeline::run_async_stage;

/// A fluent chain of asynchronous stages.
///
/// Each combinator wraps the previous future, so nothing runs until the
/// rail is awaited through [`finish`](AsyncRail::finish) or
/// [`settle`](AsyncRail::settle). Named stages are numbered from 1 and a
/// failing stage gets a step marker.
///
/// # Examples
///
/// ```rust
/// use step_rail::async_ext::AsyncRail;
///
/// async fn example() {
///     let url = AsyncRail::start("lookup", async { Ok::<_, &str>(10_u64) })
///         .then("register", |id| async move { Ok::<_, &str>(format!("account-{id}")) })
///         .with_context("registering person 10")
///         .settle(|account| account, |e| e.to_string())
///         .await;
///     assert_eq!(url, "account-10");
/// }
/// ```
#[must_use = "futures do nothing unless polled"]
pub struct AsyncRail<Fut> {
    future: Fut,
    stage: usize,
}

impl AsyncRail<Ready<Outcome<()>>> {
    /// Starts a rail by awaiting its first named stage.
    pub fn start<T, E, N, Fut>(
        name: N,
        future: Fut,
    ) -> AsyncRail<impl Future<Output = Outcome<T>>>
    where
        N: Into<Cow<'static, str>>,
        Fut: Future<Output = Result<T, E>>,
        E: IntoErrorInfo,
    {
        AsyncRail::new(future::ready(Ok(()))).then(name, move |()| future)
    }
}

impl<Fut> AsyncRail<Fut> {
    /// Wraps an existing outcome future. No stage is counted.
    #[inline]
    pub fn new(future: Fut) -> Self {
        Self { future, stage: 0 }
    }

    #[inline]
    pub fn stages(&self) -> usize {
        self.stage
    }
}

impl<Fut, T> AsyncRail<Fut>
where
    Fut: Future<Output = Outcome<T>>,
{
    /// Awaits the next named stage if every previous stage succeeded.
    pub fn then<U, E, N, F, Next>(
        self,
        name: N,
        f: F,
    ) -> AsyncRail<impl Future<Output = Outcome<U>>>
    where
        N: Into<Cow<'static, str>>,
        F: FnOnce(T) -> Next,
        Next: Future<Output = Result<U, E>>,
        E: IntoErrorInfo,
    {
        let stage = self.stage + 1;
        let name = name.into();
        let previous = self.future;
        AsyncRail {
            future: async move {
                let value = previous.await?;
                run_async_stage(stage, &name, move || f(value)).await
            },
            stage,
        }
    }

    /// Chains an outcome-returning async function without counting a stage.
    pub fn bind<U, F, Next>(self, f: F) -> AsyncRail<impl Future<Output = Outcome<U>>>
    where
        F: FnOnce(T) -> Next,
        Next: Future<Output = Outcome<U>>,
    {
        let previous = self.future;
        AsyncRail {
            future: async move {
                let value = previous.await?;
                f(value).await
            },
            stage: self.stage,
        }
    }

    pub fn map<U, F>(self, f: F) -> AsyncRail<impl Future<Output = Outcome<U>>>
    where
        F: FnOnce(T) -> U,
    {
        let previous = self.future;
        AsyncRail { future: async move { previous.await.map(f) }, stage: self.stage }
    }

    /// Attaches a context if the stages so far end in a failure.
    #[inline]
    pub fn with_context<C>(self, context: C) -> AsyncRail<impl Future<Output = Outcome<T>>>
    where
        C: IntoErrorContext,
    {
        AsyncRail { future: self.future.ctx(context), stage: self.stage }
    }

    /// Like [`with_context`](AsyncRail::with_context), built only on failure.
    #[inline]
    pub fn with_context_fn<F, C>(self, f: F) -> AsyncRail<impl Future<Output = Outcome<T>>>
    where
        F: FnOnce() -> C,
        C: IntoErrorContext,
    {
        AsyncRail { future: self.future.with_ctx(f), stage: self.stage }
    }

    /// Returns the composed future.
    #[inline]
    pub fn finish(self) -> Fut {
        self.future
    }

    /// Awaits the rail and hands the result to exactly one continuation.
    pub async fn settle<R, S, F>(self, on_success: S, on_failure: F) -> R
    where
        S: FnOnce(T) -> R,
        F: FnOnce(ErrorInfo) -> R,
    {
        match self.future.await {
            Ok(value) => on_success(value),
            Err(err) => on_failure(err),
        }
    }
}
