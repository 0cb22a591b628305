// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use checkflow::{CheckFn, CheckResult, ContextData};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// --- Common Context Struct ---
#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub label: String,
  pub checks_run: Vec<String>,
}

impl TestContext {
  pub fn labelled(label: &str) -> Self {
    Self {
      label: label.to_string(),
      ..Default::default()
    }
  }
}

pub const CHECK_FAILED: i64 = 10000;

// --- Common Check Creators ---

/// Records its name in `checks_run` and succeeds.
pub fn passing(name: &'static str) -> CheckFn<TestContext> {
  CheckFn::from_sync(move |ctx: ContextData<TestContext>| {
    let mut guard = ctx.write();
    guard.counter += 1;
    guard.checks_run.push(name.to_string());
    tracing::debug!(target: "test_checks", check = name, "passed, counter: {}", guard.counter);
    CheckResult::ok()
  })
}

/// Records its name in `checks_run` and fails with `code`.
pub fn failing(name: &'static str, code: i64) -> CheckFn<TestContext> {
  CheckFn::from_sync(move |ctx: ContextData<TestContext>| {
    ctx.write().checks_run.push(name.to_string());
    tracing::warn!(target: "test_checks", check = name, code, "failing");
    CheckResult::fail(code, format!("{} went wrong", name))
  })
}

/// Bumps `hits` after sleeping `delay_ms`, then returns `result`. Leaves the
/// context alone so it can run inside parallel nodes.
pub fn counted_after(hits: Arc<AtomicUsize>, delay_ms: u64, result: CheckResult) -> CheckFn<TestContext> {
  CheckFn::new(move |_ctx: ContextData<TestContext>| {
    let hits = hits.clone();
    let result = result.clone();
    async move {
      tokio::time::sleep(Duration::from_millis(delay_ms)).await;
      hits.fetch_add(1, Ordering::SeqCst);
      result
    }
  })
}

/// Panics once polled, after `delay_ms`.
pub fn panicking(delay_ms: u64) -> CheckFn<TestContext> {
  CheckFn::new(move |_ctx: ContextData<TestContext>| async move {
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    explode()
  })
}

fn explode() -> CheckResult {
  panic!("check exploded on purpose")
}

pub fn checks_run(ctx: &ContextData<TestContext>) -> Vec<String> {
  ctx.read().checks_run.clone()
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Atomic counters for checking execution counts ---
pub static PREDICATE_EVAL_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));
pub static HOOK_EXEC_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));

pub fn reset_counters() {
  PREDICATE_EVAL_COUNTER.store(0, Ordering::SeqCst);
  HOOK_EXEC_COUNTER.store(0, Ordering::SeqCst);
}

/// Predicate that counts its evaluations and returns `outcome`.
pub fn counted_predicate(outcome: bool) -> impl Fn(ContextData<TestContext>) -> bool + Send + Sync + 'static {
  move |_ctx: ContextData<TestContext>| {
    PREDICATE_EVAL_COUNTER.fetch_add(1, Ordering::SeqCst);
    outcome
  }
}
