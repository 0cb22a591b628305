// tests/chain_execution_tests.rs
mod common; // Reference the common module

use checkflow::{Chain, CheckFn, CheckResult, ContextData};
use common::*;
use serial_test::serial;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

#[tokio::test]
#[serial]
async fn test_chain_runs_nodes_in_append_order() {
  setup_tracing();
  let ctx = ContextData::new(TestContext::default());

  let result = Chain::<TestContext>::new(ctx.clone())
    .check([passing("a"), passing("b")])
    .check([passing("c")])
    .wait()
    .await;

  assert!(result.is_success());
  assert_eq!(result, CheckResult::ok());
  assert_eq!(checks_run(&ctx), vec!["a", "b", "c"]);
  assert_eq!(ctx.read().counter, 3);
}

#[tokio::test]
#[serial]
async fn test_empty_chain_succeeds() {
  setup_tracing();
  let chain = Chain::<TestContext>::new(TestContext::default());
  assert!(chain.is_empty());

  let result = chain.wait().await;
  assert_eq!(result, CheckResult::ok());
}

#[tokio::test]
#[serial]
async fn test_first_failure_stops_node_and_chain() {
  setup_tracing();
  let ctx = ContextData::new(TestContext::default());

  let result = Chain::<TestContext>::new(ctx.clone())
    .check([passing("a"), failing("b", CHECK_FAILED), passing("c")])
    .check([passing("d")])
    .repeat(2, [passing("e")])
    .wait()
    .await;

  assert!(result.is_failure());
  assert_eq!(result.status_code(), CHECK_FAILED);
  assert_eq!(result.message(), "b went wrong");
  assert_eq!(checks_run(&ctx), vec!["a", "b"]);
}

#[tokio::test]
#[serial]
async fn test_repeat_runs_check_list_count_times() {
  setup_tracing();
  let ctx = ContextData::new(TestContext::default());

  let result = Chain::<TestContext>::new(ctx.clone())
    .repeat(3, [passing("x"), passing("y")])
    .wait()
    .await;

  assert!(result.is_success());
  assert_eq!(ctx.read().counter, 6);
  assert_eq!(checks_run(&ctx), vec!["x", "y", "x", "y", "x", "y"]);
}

#[tokio::test]
#[serial]
async fn test_repeat_zero_runs_nothing() {
  setup_tracing();
  let ctx = ContextData::new(TestContext::default());

  let result = Chain::<TestContext>::new(ctx.clone())
    .repeat(0, [failing("never", CHECK_FAILED)])
    .check([passing("after")])
    .wait()
    .await;

  assert!(result.is_success());
  assert_eq!(checks_run(&ctx), vec!["after"]);
}

#[tokio::test]
#[serial]
async fn test_repeat_stops_at_first_failing_iteration() {
  setup_tracing();
  let ctx = ContextData::new(TestContext::default());
  let calls = Arc::new(AtomicUsize::new(0));
  let calls_in_check = calls.clone();

  // Fails on its second call.
  let flaky = CheckFn::from_sync(move |ctx: ContextData<TestContext>| {
    ctx.write().checks_run.push("flaky".to_string());
    if calls_in_check.fetch_add(1, Ordering::SeqCst) == 1 {
      CheckResult::fail(42, "second call")
    } else {
      CheckResult::ok()
    }
  });

  let result = Chain::<TestContext>::new(ctx.clone())
    .repeat(5, [passing("pre"), flaky])
    .wait()
    .await;

  assert_eq!(result.status_code(), 42);
  assert_eq!(calls.load(Ordering::SeqCst), 2);
  assert_eq!(checks_run(&ctx), vec!["pre", "flaky", "pre", "flaky"]);
}

#[tokio::test]
#[serial]
async fn test_error_cause_with_zero_status_is_failure() {
  setup_tracing();
  let ctx = ContextData::new(TestContext::default());
  let lookup = CheckFn::from_sync(|_ctx: ContextData<TestContext>| {
    CheckResult::from_error(anyhow::anyhow!("lookup service unavailable"))
  });

  let result = Chain::<TestContext>::new(ctx.clone())
    .check([lookup])
    .check([passing("unreached")])
    .wait()
    .await;

  assert_eq!(result.status_code(), 0);
  assert!(result.is_failure());
  assert_eq!(result.message(), "lookup service unavailable");
  assert!(result.cause().is_some());
  assert!(checks_run(&ctx).is_empty());
}

#[tokio::test]
#[serial]
async fn test_from_result_maps_io_error() {
  setup_tracing();
  let check = CheckFn::from_sync(|_ctx: ContextData<TestContext>| {
    CheckResult::from_result(Err::<(), _>(std::io::Error::new(std::io::ErrorKind::NotFound, "config missing")))
  });

  let result = Chain::<TestContext>::new(TestContext::default()).check([check]).wait().await;

  assert!(result.is_failure());
  assert_eq!(result.message(), "config missing");
  assert!(format!("{}", result).contains("cause=config missing"));
}

#[tokio::test]
#[serial]
async fn test_async_check_sees_context() {
  setup_tracing();
  let check = CheckFn::new(|ctx: ContextData<TestContext>| async move {
    tokio::task::yield_now().await;
    let label = ctx.read().label.clone();
    if label == "order-17" {
      CheckResult::ok()
    } else {
      CheckResult::fail(7, format!("unexpected label '{}'", label))
    }
  });

  let ok = Chain::<TestContext>::new(TestContext::labelled("order-17"))
    .check([check.clone()])
    .wait()
    .await;
  let bad = Chain::<TestContext>::new(TestContext::labelled("order-18"))
    .check([check])
    .wait()
    .await;

  assert!(ok.is_success());
  assert_eq!(bad.status_code(), 7);
  assert_eq!(bad.message(), "unexpected label 'order-18'");
}

#[tokio::test]
#[serial]
async fn test_rebuilt_chain_gives_same_result() {
  setup_tracing();
  let build = || {
    Chain::<TestContext>::new(TestContext::default())
      .check([passing("a")])
      .when(|_ctx: ContextData<TestContext>| false, [passing("b")])
      .otherwise([failing("c", CHECK_FAILED)])
  };

  let first = build().wait().await;
  let second = build().wait().await;

  assert_eq!(first, second);
  assert_eq!(first.status_code(), CHECK_FAILED);
}

#[tokio::test]
#[serial]
async fn test_prepare_scopes_context_to_later_nodes() {
  setup_tracing();
  let first = ContextData::new(TestContext::labelled("first"));
  let second = ContextData::new(TestContext::labelled("second"));

  let chain = Chain::<TestContext>::new(first.clone())
    .check([passing("n1")])
    .prepare(second.clone())
    .check([passing("n2")])
    .repeat(2, [passing("n3")]);

  assert_eq!(chain.nodes()[0].kind().name(), "check");
  assert!(chain.context().same_as(&second));

  let result = chain.wait().await;

  assert!(result.is_success());
  assert_eq!(checks_run(&first), vec!["n1"]);
  assert_eq!(checks_run(&second), vec!["n2", "n3", "n3"]);
}

#[tokio::test]
#[serial]
async fn test_prepare_with_derives_next_context() {
  setup_tracing();
  let original = ContextData::new(TestContext::labelled("base"));

  let chain = Chain::<TestContext>::new(original.clone())
    .check([passing("on_base")])
    .prepare_with(|current: &TestContext| Some(TestContext::labelled(&format!("{}-derived", current.label))));
  let derived = chain.context().clone();

  let chain = chain
    .check([passing("on_derived")])
    .prepare_with(|_current: &TestContext| None);
  assert!(chain.context().same_as(&derived));

  let result = chain.wait().await;

  assert!(result.is_success());
  assert!(!derived.same_as(&original));
  assert_eq!(derived.read().label, "base-derived");
  assert_eq!(checks_run(&original), vec!["on_base"]);
  assert_eq!(checks_run(&derived), vec!["on_derived"]);
}

#[tokio::test]
#[serial]
async fn test_node_hooks_wrap_execution_with_note() {
  setup_tracing();
  let ctx = ContextData::new(TestContext::default());

  let result = Chain::<TestContext>::new(ctx.clone())
    .check([passing("a")])
    .note("first")
    .before(|note, ctx| ctx.write().checks_run.push(format!("before:{}", note)))
    .after(|note, ctx, result| {
      ctx
        .write()
        .checks_run
        .push(format!("after:{}:{}", note, result.status_code()))
    })
    .check([failing("b", CHECK_FAILED)])
    .note("second")
    .after(|note, ctx, result| {
      ctx
        .write()
        .checks_run
        .push(format!("after:{}:{}", note, result.status_code()))
    })
    .check([passing("c")])
    .note("third")
    .before(|note, ctx| ctx.write().checks_run.push(format!("before:{}", note)))
    .wait()
    .await;

  assert_eq!(result.status_code(), CHECK_FAILED);
  assert_eq!(
    checks_run(&ctx),
    vec!["before:first", "a", "after:first:0", "b", "after:second:10000"]
  );
}

#[tokio::test]
#[serial]
async fn test_each_hooks_fill_existing_nodes_without_their_own() {
  setup_tracing();
  reset_counters();
  let ctx = ContextData::new(TestContext::default());

  let result = Chain::<TestContext>::new(ctx.clone())
    .check([passing("a")])
    .note("one")
    .check([passing("b")])
    .note("two")
    .before(|note, ctx| ctx.write().checks_run.push(format!("own:{}", note)))
    .before_each(|note, ctx| ctx.write().checks_run.push(format!("each:{}", note)))
    .after_each(|_note, _ctx, _result| {
      HOOK_EXEC_COUNTER.fetch_add(1, Ordering::SeqCst);
    })
    .check([passing("c")])
    .note("three")
    .wait()
    .await;

  assert!(result.is_success());
  // "three" was appended after the defaults were set, so it has no hooks.
  assert_eq!(checks_run(&ctx), vec!["each:one", "a", "own:two", "b", "c"]);
  assert_eq!(HOOK_EXEC_COUNTER.load(Ordering::SeqCst), 2);
}

#[tokio::test]
#[serial]
async fn test_each_hooks_before_any_node_do_nothing() {
  setup_tracing();
  reset_counters();

  let result = Chain::<TestContext>::new(TestContext::default())
    .before_each(|_note, _ctx| {
      HOOK_EXEC_COUNTER.fetch_add(1, Ordering::SeqCst);
    })
    .check([passing("a")])
    .wait()
    .await;

  assert!(result.is_success());
  assert_eq!(HOOK_EXEC_COUNTER.load(Ordering::SeqCst), 0);
}

#[tokio::test]
#[serial]
async fn test_node_setters_before_any_node_are_ignored() {
  setup_tracing();
  reset_counters();

  let chain = Chain::<TestContext>::new(TestContext::default())
    .note("nothing to label")
    .before(|_note, _ctx| {
      HOOK_EXEC_COUNTER.fetch_add(1, Ordering::SeqCst);
    })
    .check([passing("a")]);

  assert_eq!(chain.nodes()[0].note(), "");
  let result = chain.wait().await;

  assert!(result.is_success());
  assert_eq!(HOOK_EXEC_COUNTER.load(Ordering::SeqCst), 0);
}

#[tokio::test]
#[serial]
async fn test_outcome_hooks_fire_once() {
  setup_tracing();
  let successes = Arc::new(AtomicUsize::new(0));
  let failures = Arc::new(AtomicUsize::new(0));

  let build = |checks: Vec<CheckFn<TestContext>>| {
    let successes = successes.clone();
    let failures = failures.clone();
    Chain::<TestContext>::new(TestContext::default())
      .check(checks)
      .on_success(move |_ctx, result| {
        assert!(result.is_success());
        successes.fetch_add(1, Ordering::SeqCst);
      })
      .on_failure(move |ctx, result| {
        assert_eq!(result.status_code(), CHECK_FAILED);
        assert_eq!(ctx.read().checks_run, vec!["bad"]);
        failures.fetch_add(1, Ordering::SeqCst);
      })
  };

  build(vec![passing("good")]).wait().await;
  build(vec![failing("bad", CHECK_FAILED)]).wait().await;

  assert_eq!(successes.load(Ordering::SeqCst), 1);
  assert_eq!(failures.load(Ordering::SeqCst), 1);
}

#[tokio::test]
#[serial]
async fn test_passing_check_result_is_not_surfaced() {
  setup_tracing();
  let chatty = CheckFn::from_sync(|_ctx: ContextData<TestContext>| CheckResult::new(0, "all good here"));

  let result = Chain::<TestContext>::new(TestContext::default())
    .check([chatty.clone()])
    .parallel([chatty.clone()])
    .repeat(2, [chatty])
    .wait()
    .await;

  assert!(result.is_success());
  assert_eq!(result.message(), "");
  assert_eq!(result, CheckResult::ok());
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "non-zero status code")]
fn test_fail_rejects_zero_status() {
  let _ = CheckResult::fail(0, "not really a failure");
}

#[test]
fn test_fail_and_new_differ_only_in_intent() {
  let failed = CheckResult::fail(CHECK_FAILED, "something wrong");
  assert!(failed.is_failure());
  assert_eq!(failed, CheckResult::new(CHECK_FAILED, "something wrong"));
  assert!(CheckResult::new(0, "fine").is_success());
}
