// tests/pipe.rs

use serde_json::{json, Value};

use cmdkit::{
    async_run_command, run_command, Command, CommandError, PipeCommand,
};
use cmdkit_test_utils::commands::{
    AppendCommand, FailCommand, RaiseCommand,
};
use cmdkit_test_utils::{init_tracing, with_timeout};

fn pipe(commands: Vec<Box<dyn Command>>) -> PipeCommand {
    PipeCommand::new(commands).expect("non-empty command list")
}

#[test]
fn chains_outputs_in_order() {
    init_tracing();

    let pipe = pipe(vec![
        Box::new(AppendCommand::new("A")),
        Box::new(AppendCommand::new("B")),
        Box::new(AppendCommand::new("C")),
    ]);
    let res = run_command(&pipe, None);
    assert!(res.succeeded);
    assert_eq!(res.output, json!("ABC"));
}

#[test]
fn initial_input_feeds_first_stage() {
    init_tracing();

    let pipe = pipe(vec![
        Box::new(AppendCommand::new("A")),
        Box::new(AppendCommand::new("B")),
        Box::new(AppendCommand::new("C")),
    ]);
    let res = run_command(&pipe, Some(json!("D")));
    assert_eq!(res.output, json!("DABC"));
    assert_eq!(res.results.len(), 3);
    assert_eq!(res.results[0].output, json!("DA"));
    assert!(res.results[0].succeeded);
    assert_eq!(res.results[1].output, json!("DAB"));
    assert_eq!(res.results[2].output, json!("DABC"));
}

#[test]
fn soft_failure_short_circuits() {
    init_tracing();

    let pipe = pipe(vec![
        Box::new(AppendCommand::new("A")),
        Box::new(FailCommand::new()),
        Box::new(AppendCommand::new("C")),
    ]);
    let res = run_command(&pipe, None);
    assert_eq!(res.output, Value::Null);
    assert!(!res.succeeded);
    assert_eq!(
        res.error_message.as_deref(),
        Some("failure from FailCommand")
    );
    // A soft failure carries no fault object.
    assert!(res.error.is_none());
    // The failing stage is the last collected one; nothing after it ran.
    assert_eq!(res.results.len(), 2);
    assert_eq!(res.results[0].output, json!("A"));
    assert!(!res.results[1].succeeded);
}

#[test]
fn raised_fault_is_normalized_and_short_circuits() {
    init_tracing();

    let pipe = pipe(vec![
        Box::new(AppendCommand::new("A")),
        Box::new(RaiseCommand::new()),
        Box::new(AppendCommand::new("C")),
    ]);
    let res = run_command(&pipe, None);
    assert!(!res.succeeded);
    assert_eq!(res.output, Value::Null);
    assert!(matches!(
        res.error.as_deref(),
        Some(CommandError::Other(_))
    ));
    assert_eq!(res.results.len(), 2);
}

#[test]
fn collection_can_be_disabled() {
    init_tracing();

    let pipe = pipe(vec![
        Box::new(AppendCommand::new("A")),
        Box::new(FailCommand::new()),
        Box::new(AppendCommand::new("C")),
    ])
    .with_collect_results(false);
    let res = run_command(&pipe, None);
    assert_eq!(res.output, Value::Null);
    assert!(!res.succeeded);
    assert_eq!(
        res.error_message.as_deref(),
        Some("failure from FailCommand")
    );
    assert!(res.results.is_empty());
}

#[test]
fn single_stage_behaves_like_the_stage_itself() {
    init_tracing();

    let direct = run_command(&AppendCommand::new("A"), Some(json!("D")));
    let pipe = pipe(vec![Box::new(AppendCommand::new("A"))]);
    let piped = run_command(&pipe, Some(json!("D")));

    assert_eq!(piped.output, direct.output);
    assert_eq!(piped.succeeded, direct.succeeded);
}

#[test]
fn empty_command_list_is_rejected() {
    init_tracing();

    let err = PipeCommand::new(Vec::new()).unwrap_err();
    assert!(matches!(err, CommandError::InvalidArgument(_)));
}

#[tokio::test]
async fn async_chaining_matches_sync() {
    init_tracing();

    let pipe = pipe(vec![
        Box::new(AppendCommand::new("A")),
        Box::new(AppendCommand::new("B")),
        Box::new(AppendCommand::new("C")),
    ]);
    let res = with_timeout(async_run_command(&pipe, Some(json!("D")))).await;
    assert!(res.succeeded);
    assert_eq!(res.output, json!("DABC"));
    assert_eq!(res.results[0].output, json!("DA"));
}

#[tokio::test]
async fn async_failure_short_circuits() {
    init_tracing();

    let pipe = pipe(vec![
        Box::new(AppendCommand::new("A")),
        Box::new(RaiseCommand::new()),
        Box::new(AppendCommand::new("C")),
    ]);
    let res = with_timeout(async_run_command(&pipe, None)).await;
    assert!(!res.succeeded);
    assert_eq!(res.output, Value::Null);
    assert_eq!(res.results.len(), 2);
}
