use step_rail::traits::IntoErrorContext;
use step_rail::{Cancelled, ErrorContext, ErrorInfo, LazyContext, TimedOut};
use std::time::Duration;

pub mod rail;

#[test]
fn error_info_accumulates_contexts_and_code() {
    let err = ErrorInfo::new("read failure")
        .with_context(ErrorContext::tag("fs"))
        .with_context(ErrorContext::step(2, "load"))
        .set_code(404);

    assert_eq!(err.code(), Some(404));
    let contexts = err.context();
    assert_eq!(contexts.len(), 2);
    assert_eq!(contexts[0], ErrorContext::step(2, "load"));
    assert_eq!(contexts[1], ErrorContext::tag("fs"));
}

#[test]
fn error_chain_lists_most_recent_context_first() {
    let err = ErrorInfo::new("boom")
        .with_context(ErrorContext::step(1, "parse"))
        .with_context("handling request");

    assert_eq!(err.error_chain(), "handling request -> step 1 (parse) -> boom");
}

#[test]
fn failed_step_finds_innermost_marker() {
    let err = ErrorInfo::new("boom")
        .with_context(ErrorContext::step(3, "publish"))
        .with_context(ErrorContext::step(1, "outer"));

    assert_eq!(err.failed_step(), Some((3, "publish")));
    assert_eq!(ErrorInfo::new("plain").failed_step(), None);
}

#[test]
fn lazy_context_evaluates_on_use() {
    let lazy = LazyContext::new(|| "computed".to_string());
    let ctx = lazy.into_error_context();

    assert_eq!(ctx.message(), "computed");
}

#[test]
fn source_is_kept_and_downcastable() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
    let err = ErrorInfo::with_source("cannot load person", io);

    assert_eq!(err.message(), "cannot load person");
    let source = err.downcast_source::<std::io::Error>().unwrap();
    assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
    assert_eq!(err.causes().count(), 1);
}

#[derive(Debug)]
struct SaveFailed(std::io::Error);

impl std::fmt::Display for SaveFailed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("save failed")
    }
}

impl std::error::Error for SaveFailed {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

#[test]
fn causes_walk_nested_sources() {
    let io = std::io::Error::new(std::io::ErrorKind::Other, "disk unplugged");
    let err = ErrorInfo::with_source("cannot update person 10", SaveFailed(io));

    let causes: Vec<String> = err.causes().map(|cause| cause.to_string()).collect();
    assert_eq!(err.causes().count(), 2);
    assert_eq!(causes, ["save failed", "disk unplugged"]);
}

#[test]
fn cancellation_and_timeout_are_recognised() {
    let cancelled = ErrorInfo::cancelled();
    assert!(cancelled.is_cancelled());
    assert!(!cancelled.is_timeout());
    assert_eq!(cancelled.downcast_source::<Cancelled>(), Some(&Cancelled));

    let timed_out = ErrorInfo::timed_out(Duration::from_millis(5));
    assert!(timed_out.is_timeout());
    assert_eq!(timed_out.downcast_source::<TimedOut>(), Some(&TimedOut(Duration::from_millis(5))));
    assert_eq!(timed_out.message(), "operation timed out after 5ms");
}

#[test]
fn equality_ignores_source_identity() {
    let a = ErrorInfo::from_error(std::fmt::Error);
    let b = ErrorInfo::from_error(std::fmt::Error);
    assert_eq!(a, b);
    assert_ne!(a, ErrorInfo::new(a.message().to_owned()));
}

#[cfg(feature = "serde")]
#[test]
fn error_info_serializes_without_source() {
    let err = ErrorInfo::with_source("lookup failed", std::fmt::Error)
        .with_context(ErrorContext::step(1, "create_context"))
        .set_code(404);

    let json = serde_json::to_string(&err).unwrap();
    let back: ErrorInfo = serde_json::from_str(&json).unwrap();

    assert_eq!(back.message(), "lookup failed");
    assert_eq!(back.failed_step(), Some((1, "create_context")));
    assert_eq!(back.code(), Some(404));
    assert!(back.source_error().is_none());
}
