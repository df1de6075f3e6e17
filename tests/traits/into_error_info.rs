use std::borrow::Cow;
use std::error::Error;

use step_rail::traits::IntoErrorInfo;
use step_rail::{ErrorContext, ErrorInfo};

#[test]
fn strings_become_messages_without_source() {
    let from_str = "not found".into_error_info();
    let from_string = String::from("not found").into_error_info();
    let from_cow = Cow::Borrowed("not found").into_error_info();

    assert_eq!(from_str, from_string);
    assert_eq!(from_string, from_cow);
    assert!(from_str.source_error().is_none());
}

#[test]
fn error_info_converts_to_itself() {
    let original = ErrorInfo::new("boom").with_context(ErrorContext::tag("x"));
    assert_eq!(original.clone().into_error_info(), original);
}

#[test]
fn boxed_errors_keep_their_source() {
    let boxed: Box<dyn Error + Send + Sync> = Box::new(std::fmt::Error);
    let info = boxed.into_error_info();

    assert!(info.downcast_source::<std::fmt::Error>().is_some());
    assert_eq!(info.message(), std::fmt::Error.to_string());
}
