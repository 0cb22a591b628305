// checkflow/src/chain/parallel.rs

//! Fan-out for parallel nodes: one tokio task per check, all joined before any
//! result is inspected.

use crate::core::check::CheckFn;
use crate::core::context_data::ContextData;
use crate::core::result::CheckResult;
use tokio::runtime::Handle;
use tokio::task::JoinSet;
use tracing::{event, Level};

/// Runs `checks` concurrently against `ctx` and returns the first failure in
/// submission order, or `None` when every check succeeded.
///
/// Every worker is awaited, including after an early failure. A worker that
/// cannot be joined (it panicked or was cancelled) yields the infrastructure
/// failure result unless an earlier worker already failed. Dropping the
/// `JoinSet` aborts whatever is still running if this future is itself dropped.
///
/// Without a current tokio runtime nothing is spawned and the infrastructure
/// failure result is returned.
pub(crate) async fn run_parallel<T>(checks: &[CheckFn<T>], ctx: &ContextData<T>) -> Option<CheckResult>
where
  T: 'static + Send + Sync,
{
  if checks.is_empty() {
    return None;
  }
  if let Err(no_runtime) = Handle::try_current() {
    event!(Level::ERROR, error = %no_runtime, "Parallel node awaited outside a tokio runtime.");
    return Some(CheckResult::infrastructure_failure());
  }

  let mut workers = JoinSet::new();
  for (index, check) in checks.iter().enumerate() {
    let check = check.clone();
    let ctx = ctx.clone();
    workers.spawn(async move { (index, check.run(ctx).await) });
  }
  event!(Level::TRACE, workers = checks.len(), "Parallel workers spawned.");

  // Slots stay `None` for workers that could not be joined.
  let mut slots: Vec<Option<CheckResult>> = vec![None; checks.len()];
  while let Some(joined) = workers.join_next().await {
    match joined {
      Ok((index, result)) => slots[index] = Some(result),
      Err(join_err) => {
        event!(
          Level::ERROR,
          error = %join_err,
          panicked = join_err.is_panic(),
          "Parallel worker could not be joined."
        );
      }
    }
  }

  for (index, slot) in slots.into_iter().enumerate() {
    match slot {
      Some(result) if result.is_failure() => {
        event!(Level::DEBUG, worker_index = index, status_code = result.status_code(), "Parallel check failed.");
        return Some(result);
      }
      Some(_) => {}
      None => return Some(CheckResult::infrastructure_failure()),
    }
  }
  None
}
