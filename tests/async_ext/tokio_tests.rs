//! Tests for Tokio integration.

use std::time::Duration;

use step_rail::async_ext::{spawn_step, step_timeout};
use step_rail::prelude_async::*;
use step_rail::{Panicked, TimedOut};

#[tokio::test]
async fn spawned_step_returns_its_outcome() {
    let handle = spawn_step(async { Ok::<_, &str>("anUrl".to_owned()) });
    assert_eq!(handle.await, Ok("anUrl".to_owned()));
}

#[tokio::test]
async fn spawned_step_converts_its_error() {
    let err = spawn_step(async { Err::<(), _>(String::from("rate limited")) }).await.unwrap_err();
    assert_eq!(err.message(), "rate limited");
}

#[tokio::test]
async fn aborted_step_settles_as_cancelled() {
    let handle = spawn_step(async {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok::<_, &str>(())
    });
    handle.abort();

    let err = handle.await.unwrap_err();
    assert!(err.is_cancelled());
    assert!(!err.is_panic());
}

#[tokio::test]
async fn panicking_task_settles_as_panicked() {
    let handle = spawn_step(async {
        if true {
            panic!("publish exploded");
        }
        Ok::<u32, &str>(0)
    });

    let err = handle.await.unwrap_err();
    assert!(err.is_panic());
    assert_eq!(err.downcast_source::<Panicked>().map(Panicked::message), Some("publish exploded"));
}

#[tokio::test]
async fn slow_step_times_out() {
    let slow = async {
        tokio::time::sleep(Duration::from_secs(10)).await;
        Ok::<_, &str>(1)
    };

    let err = step_timeout(Duration::from_millis(50), slow).await.unwrap_err();

    assert!(err.is_timeout());
    assert_eq!(err.downcast_source::<TimedOut>(), Some(&TimedOut(Duration::from_millis(50))));
}

#[tokio::test]
async fn fast_step_beats_its_deadline() {
    let value = step_timeout(Duration::from_secs(5), async { Ok::<_, &str>(3) }).await;
    assert_eq!(value, Ok(3));
}

#[tokio::test]
async fn timeout_composes_with_pipeline_steps() {
    let pipeline = AsyncPipeline::new().then("publish", |n: u32| {
        step_timeout(Duration::from_millis(10), async move {
            std::future::pending::<()>().await;
            Ok::<_, &str>(n)
        })
    });

    let err = pipeline.execute(1).await.unwrap_err();
    assert!(err.is_timeout());
    assert_eq!(err.failed_step(), Some((1, "publish")));
}
