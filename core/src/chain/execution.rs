// checkflow/src/chain/execution.rs

//! Contains `Chain::wait()`, the single execution entry point, and the
//! per-kind node execution it dispatches to.

use crate::chain::definition::Chain;
use crate::chain::parallel::run_parallel;
use crate::conditional::group::BranchGroups;
use crate::core::check::{CheckFn, Condition};
use crate::core::context_data::ContextData;
use crate::core::node::{Node, NodeKind};
use crate::core::result::CheckResult;
use tracing::{event, instrument, span, Instrument, Level};

/// What a node reports back to the walk.
struct NodeOutcome {
  result: CheckResult,
  /// A branch node whose predicate held and whose checks all passed. Its
  /// group is resolved from here on.
  matched: bool,
}

/// Runs `checks` once, in order, returning the first failure.
async fn run_in_order<T>(checks: &[CheckFn<T>], ctx: &ContextData<T>) -> Option<CheckResult>
where
  T: 'static + Send + Sync,
{
  for (check_index, check) in checks.iter().enumerate() {
    let result = check.run(ctx.clone()).await;
    if result.is_failure() {
      event!(Level::DEBUG, check_index, status_code = result.status_code(), "Check failed.");
      return Some(result);
    }
  }
  None
}

/// Executes one node. Successful nodes hand back `prior` unchanged; they never
/// assert success on their own.
async fn execute_node<T>(node: &Node<T>, prior: &CheckResult) -> NodeOutcome
where
  T: 'static + Send + Sync,
{
  let failure = match &node.kind {
    NodeKind::Sequential | NodeKind::ConditionalElse => run_in_order(&node.checks, &node.context).await,
    NodeKind::Repeated { count } => {
      let mut failure = None;
      for iteration in 0..*count {
        if let Some(f) = run_in_order(&node.checks, &node.context).await {
          event!(Level::DEBUG, iteration, "Repeat stopped early.");
          failure = Some(f);
          break;
        }
      }
      failure
    }
    NodeKind::Parallel => run_parallel(&node.checks, &node.context).await,
    NodeKind::Conditional { predicate } | NodeKind::ConditionalElseIf { predicate } => {
      if !predicate.evaluate(node.context.clone()) {
        event!(Level::DEBUG, "Predicate false; branch not taken.");
        return NodeOutcome {
          result: prior.clone(),
          matched: false,
        };
      }
      event!(Level::DEBUG, "Predicate true; running branch.");
      run_in_order(&node.checks, &node.context).await
    }
  };

  match failure {
    Some(result) => NodeOutcome { result, matched: false },
    None => NodeOutcome {
      result: prior.clone(),
      matched: node.group.is_some(),
    },
  }
}

impl<T> Chain<T>
where
  T: 'static + Send + Sync,
{
  /// Runs the chain and returns its final result.
  ///
  /// Nodes execute strictly in append order. A node is bypassed when an
  /// earlier node already left a failure in the result cell, or when another
  /// member of its branch group already matched. Every executed node writes
  /// its result to the cell, even when it is the unchanged prior value.
  ///
  /// Parallel nodes spawn tokio tasks, so a chain containing one must be
  /// awaited inside a tokio runtime.
  #[instrument(
        name = "Chain::wait",
        skip_all,
        fields(
            context_type = %std::any::type_name::<T>(),
            num_nodes = self.nodes.len(),
            num_groups = self.groups_opened,
        )
    )]
  pub async fn wait(self) -> CheckResult {
    let Chain {
      context,
      nodes,
      mut result,
      groups_opened,
      on_success,
      on_failure,
    } = self;
    let mut groups = BranchGroups::new(groups_opened);
    event!(Level::DEBUG, "Chain execution starting.");

    for (node_index, node) in nodes.iter().enumerate() {
      if result.get().is_failure() {
        event!(
          Level::DEBUG,
          node_index,
          remaining = nodes.len() - node_index,
          "Chain already failed; bypassing remaining nodes."
        );
        break;
      }
      if groups.is_resolved(node.group) {
        event!(Level::DEBUG, node_index, kind = node.kind.name(), "Branch group already matched; node bypassed.");
        continue;
      }

      let node_span = span!(
        Level::INFO,
        "chain_node_execution",
        node_index,
        kind = node.kind.name(),
        note = node.note()
      );

      if let Some(hook) = &node.before {
        node_span.in_scope(|| hook(node.note(), &node.context));
      }

      let outcome = execute_node(node, result.get()).instrument(node_span.clone()).await;
      if outcome.matched {
        if let Some(group) = node.group {
          groups.resolve(group);
        }
      }
      result.set(outcome.result);

      if let Some(hook) = &node.after {
        node_span.in_scope(|| hook(node.note(), &node.context, result.get()));
      }
    }

    let final_result = result.into_inner();
    if final_result.is_success() {
      event!(Level::DEBUG, "Chain execution completed successfully.");
      if let Some(hook) = &on_success {
        hook(&context, &final_result);
      }
    } else {
      event!(Level::INFO, result = %final_result, "Chain execution failed.");
      if let Some(hook) = &on_failure {
        hook(&context, &final_result);
      }
    }
    final_result
  }
}
