//! Tests for tracing integration.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use step_rail::async_ext::{instrument_error, ResultSpanExt};
use step_rail::prelude_async::*;
use tracing::Span;

#[test]
fn result_with_span_names_the_span() {
    let err = Err::<(), _>("not found").with_span(&Span::none()).unwrap_err();
    assert_eq!(err.error_chain(), "in span 'unknown' -> not found");
}

#[test]
fn result_with_current_span_passes_success_through() {
    let value: Result<i32, &str> = Ok(42);
    assert_eq!(value.with_current_span(), Ok(42));
}

#[test]
fn result_with_current_span_tags_failure() {
    let err = Err::<(), _>("rate limited").with_current_span().unwrap_err();
    assert!(err.error_chain().starts_with("in span '"));
    assert!(err.error_chain().ends_with("rate limited"));
}

#[test]
fn instrument_error_converts_and_tags() {
    let err = instrument_error(String::from("something went wrong"));

    assert_eq!(err.message(), "something went wrong");
    assert_eq!(err.context().len(), 1);
}

#[tokio::test]
async fn future_with_span_context_passes_success_through() {
    let value = async { Ok::<_, &str>(42) }.with_span_context().await;
    assert_eq!(value, Ok(42));
}

#[tokio::test]
async fn future_with_span_tags_failure() {
    let err = async { Err::<i32, _>("failed") }.with_span(Span::none()).await.unwrap_err();
    assert_eq!(err.error_chain(), "in span 'unknown' -> failed");
}

#[tokio::test]
async fn span_context_future_stays_pending() {
    struct Stalled;

    impl Future for Stalled {
        type Output = Result<i32, &'static str>;

        fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
            Poll::Pending
        }
    }

    let mut future = Box::pin(Stalled.with_span_context());
    let pending = std::future::poll_fn(|cx| Poll::Ready(future.as_mut().poll(cx).is_pending())).await;

    assert!(pending);
}
