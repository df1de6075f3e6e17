use std::cell::Cell;

use step_rail::{context, ErrorInfo, Outcome, Rail};

#[test]
fn all_stages_succeed() {
    let rail = Rail::start("lookup", || Ok::<_, &str>(10_u64))
        .then("register", |id| Ok::<_, &str>(format!("account-{id}")))
        .map(|account| account.len());

    assert_eq!(rail.stages(), 2);
    assert!(!rail.is_failure());
    assert_eq!(rail.finish(), Ok(10));
}

#[test]
fn later_stages_are_skipped_after_failure() {
    let calls = Cell::new(0);

    let err = Rail::start("lookup", || Ok::<_, &str>(1))
        .then("register", |_: i32| Err::<i32, _>("rejected"))
        .then("authenticate", |n| {
            calls.set(calls.get() + 1);
            Ok::<_, &str>(n)
        })
        .then("publish", |n| {
            calls.set(calls.get() + 1);
            Ok::<_, &str>(n)
        })
        .finish()
        .unwrap_err();

    assert_eq!(calls.get(), 0);
    assert_eq!(err.message(), "rejected");
    assert_eq!(err.failed_step(), Some((2, "register")));
}

#[test]
fn panic_in_stage_becomes_its_failure() {
    let err = Rail::success(3)
        .then("divide", |n: i32| -> Result<i32, ErrorInfo> {
            if n > 0 {
                panic!("division blew up");
            }
            Ok(n)
        })
        .finish()
        .unwrap_err();

    assert!(err.is_panic());
    assert_eq!(err.failed_step(), Some((1, "divide")));
}

#[test]
fn map_and_bind_do_not_run_on_failure() {
    let ran = Cell::new(false);

    let outcome = Rail::new(Err::<u32, _>("boom"))
        .map(|n| {
            ran.set(true);
            n + 1
        })
        .bind(|n| -> Outcome<u32> {
            ran.set(true);
            Ok(n)
        })
        .finish();

    assert!(!ran.get());
    assert_eq!(outcome, Err(ErrorInfo::new("boom")));
}

#[test]
fn contexts_are_added_only_to_failures() {
    let ok = Rail::success(1).with_context(context!("never formatted {}", 1)).finish();
    assert_eq!(ok, Ok(1));

    let err = Rail::start("lookup", || Err::<u32, _>("missing"))
        .with_context("registering person 10")
        .finish()
        .unwrap_err();
    assert_eq!(err.error_chain(), "registering person 10 -> step 1 (lookup) -> missing");
}

#[test]
fn settle_runs_exactly_one_branch() {
    let successes = Cell::new(0);
    let failures = Cell::new(0);

    Rail::start("ok", || Ok::<_, &str>(())).settle(
        |()| successes.set(successes.get() + 1),
        |_| failures.set(failures.get() + 1),
    );
    Rail::start("fail", || Err::<(), _>("no")).settle(
        |()| successes.set(successes.get() + 1),
        |_| failures.set(failures.get() + 1),
    );

    assert_eq!((successes.get(), failures.get()), (1, 1));
}

#[test]
fn rail_converts_into_outcome() {
    let outcome: Outcome<u8> = Rail::success(7).into();
    assert_eq!(outcome, Ok(7));
}
