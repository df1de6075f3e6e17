use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use step_rail::{ErrorInfo, NamedStep, Outcome, Pipeline, PipelineContext, Step};

#[derive(Debug, Clone, PartialEq)]
struct Tally {
    trail: Vec<&'static str>,
    total: i64,
}

impl PipelineContext for Tally {
    type Output = i64;

    fn into_output(self) -> i64 {
        self.total
    }
}

fn add(n: i64) -> impl Fn(Tally) -> Outcome<Tally> {
    move |mut tally: Tally| {
        tally.total += n;
        Ok(tally)
    }
}

fn counted(counter: &Arc<AtomicUsize>) -> impl Fn(Tally) -> Outcome<Tally> + 'static {
    let counter = Arc::clone(counter);
    move |tally| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(tally)
    }
}

#[test]
fn successful_run_is_the_fold_of_all_steps() {
    let pipeline = Pipeline::start("create", |start: i64| Ok(Tally { trail: vec!["create"], total: start }))
        .then("add_two", add(2))
        .then("add_three", add(3))
        .then("double", |mut tally: Tally| {
            tally.total *= 2;
            tally.trail.push("double");
            Ok(tally)
        });

    let folded = (1 + 2 + 3) * 2;
    assert_eq!(pipeline.execute(1).map(|t| t.total), Ok(folded));
    assert_eq!(pipeline.len(), 4);
    assert_eq!(pipeline.step_names(), ["create", "add_two", "add_three", "double"]);
}

#[test]
fn failure_at_step_k_skips_the_rest() {
    let after = Arc::new(AtomicUsize::new(0));

    let pipeline = Pipeline::new()
        .then("first", add(1))
        .then("second", |_: Tally| Err(ErrorInfo::new("second broke")))
        .then("third", counted(&after))
        .then("fourth", counted(&after));

    let err = pipeline.execute(Tally { trail: vec![], total: 0 }).unwrap_err();

    assert_eq!(after.load(Ordering::SeqCst), 0);
    assert_eq!(err.message(), "second broke");
    assert_eq!(err.failed_step(), Some((2, "second")));
}

#[test]
fn empty_pipeline_returns_its_input() {
    let pipeline = Pipeline::<Tally, Tally>::new();
    let input = Tally { trail: vec!["untouched"], total: 7 };

    assert!(pipeline.is_empty());
    assert_eq!(pipeline.execute(input.clone()), Ok(input));
}

#[test]
fn entry_failure_is_step_one() {
    let later = Arc::new(AtomicUsize::new(0));
    let pipeline = Pipeline::start("create", |id: u64| -> Outcome<Tally> {
        Err(ErrorInfo::new(format!("person {id} not found")))
    })
    .then("next", counted(&later));

    let err = pipeline.execute(10).unwrap_err();
    assert_eq!(err.failed_step(), Some((1, "create")));
    assert_eq!(err.to_string(), "step 1 (create) -> person 10 not found");
    assert_eq!(later.load(Ordering::SeqCst), 0);
}

#[test]
fn panicking_step_is_captured_as_its_failure() {
    let after = Arc::new(AtomicUsize::new(0));
    let pipeline = Pipeline::new()
        .then("explode", |_: Tally| -> Outcome<Tally> { panic!("step blew up") })
        .then("after", counted(&after));

    let err = pipeline.execute(Tally { trail: vec![], total: 0 }).unwrap_err();

    assert!(err.is_panic());
    assert_eq!(err.failed_step(), Some((1, "explode")));
    assert_eq!(after.load(Ordering::SeqCst), 0);
}

#[test]
fn run_passes_output_to_exactly_one_continuation() {
    let pipeline = Pipeline::new().then("add", add(5));
    let calls = AtomicUsize::new(0);

    let out = pipeline.run(
        Tally { trail: vec![], total: 1 },
        |total| {
            calls.fetch_add(1, Ordering::SeqCst);
            total
        },
        |_| {
            calls.fetch_add(100, Ordering::SeqCst);
            -1
        },
    );

    assert_eq!(out, 6);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn run_with_hands_failure_to_failure_branch() {
    let pipeline = Pipeline::new().then("reject", |_: Tally| -> Outcome<Tally> { Err("rejected".into()) });

    let rendered = pipeline.run_with(
        Tally { trail: vec![], total: 0 },
        |tally| format!("ok {}", tally.total),
        |err| format!("failed: {err}"),
    );

    assert_eq!(rendered, "failed: step 1 (reject) -> rejected");
}

#[test]
fn pipeline_is_reusable_across_runs() {
    let pipeline = Pipeline::start("parse", |raw: &'static str| {
        raw.parse::<i64>().map(|total| Tally { trail: vec![], total }).map_err(|e| ErrorInfo::new(e.to_string()))
    })
    .then("add", add(1));

    assert_eq!(pipeline.run("41", |t| t, |_| 0), 42);
    assert_eq!(pipeline.run("nope", |t| t, |_| 0), 0);
    assert_eq!(pipeline.run("1", |t| t, |_| 0), 2);
}

struct Reject;

impl Step<Tally> for Reject {
    fn name(&self) -> &str {
        "reject"
    }

    fn apply(&self, _context: Tally) -> Outcome<Tally> {
        Err(ErrorInfo::new("rejected by custom step").set_code(422))
    }
}

#[test]
fn custom_step_types_can_be_mixed_with_closures() {
    let pipeline = Pipeline::new().step(NamedStep::new("add", add(1))).step(Reject);

    let err = pipeline.execute(Tally { trail: vec![], total: 0 }).unwrap_err();
    assert_eq!(err.code(), Some(422));
    assert_eq!(err.failed_step(), Some((2, "reject")));
    assert_eq!(format!("{pipeline:?}"), r#"Pipeline { steps: ["add", "reject"] }"#);
}

#[test]
fn pipeline_runs_concurrently_from_several_threads() {
    let runs = Arc::new(AtomicUsize::new(0));
    let pipeline = Pipeline::new().then("add", add(2)).then("count", counted(&runs));

    let totals: Vec<i64> = std::thread::scope(|scope| {
        let workers: Vec<_> = (0..4)
            .map(|start| {
                let pipeline = &pipeline;
                scope.spawn(move || pipeline.run(Tally { trail: vec![], total: start }, |t| t, |_| -1))
            })
            .collect();
        workers.into_iter().map(|worker| worker.join().unwrap()).collect()
    });

    assert_eq!(totals, [2, 3, 4, 5]);
    assert_eq!(runs.load(Ordering::SeqCst), 4);
}
