// checkflow/src/chain/steps.rs

//! Declarative construction: build a chain from a list of `Step`s, validated
//! step by step as nodes are appended.

use crate::chain::definition::Chain;
use crate::core::check::{CheckFn, Predicate};
use crate::core::context_data::ContextData;
use crate::core::node::NodeKind;
use crate::error::{ChainError, ChainResult};
use tracing::{event, instrument, Level};

/// One entry of a declarative chain definition.
///
/// Unlike the fluent builder, a step list can describe invalid chains (a
/// missing predicate, a dangling `ElseIf`/`Else`); [`Chain::from_steps`]
/// rejects those and drops whatever it had built so far.
pub enum Step<T: 'static + Send + Sync> {
  Check(Vec<CheckFn<T>>),
  Repeat(usize, Vec<CheckFn<T>>),
  Parallel(Vec<CheckFn<T>>),
  If {
    predicate: Option<Predicate<T>>,
    checks: Vec<CheckFn<T>>,
  },
  ElseIf {
    predicate: Option<Predicate<T>>,
    checks: Vec<CheckFn<T>>,
  },
  Else(Vec<CheckFn<T>>),
  /// Switches the context for the steps that follow. Not a node.
  Prepare(ContextData<T>),
}

impl<T: 'static + Send + Sync> Step<T> {
  fn kind_name(&self) -> &'static str {
    match self {
      Step::Check(_) => "check",
      Step::Repeat(..) => "repeat",
      Step::Parallel(_) => "parallel",
      Step::If { .. } => "when",
      Step::ElseIf { .. } => "or_when",
      Step::Else(_) => "otherwise",
      Step::Prepare(_) => "prepare",
    }
  }
}

/// Checks that an `ElseIf`/`Else` step directly follows an `If`/`ElseIf`.
/// `previous` is the kind of the last node-producing step, if any.
fn check_continuation(index: usize, kind: &'static str, previous: Option<&'static str>) -> ChainResult<()> {
  match previous {
    None => Err(ChainError::BranchWithoutPredecessor { index, kind }),
    Some(prev) if prev != "when" && prev != "or_when" => Err(ChainError::OrphanBranch {
      index,
      kind,
      previous: prev,
    }),
    Some(_) => Ok(()),
  }
}

impl<T> Chain<T>
where
  T: 'static + Send + Sync,
{
  /// Builds a chain from `steps`, failing fast on the first invalid step.
  #[instrument(name = "Chain::from_steps", skip_all, fields(num_steps = steps.len()), err(Display))]
  pub fn from_steps(context: impl Into<ContextData<T>>, steps: Vec<Step<T>>) -> ChainResult<Self> {
    let mut chain = Self::new(context);
    // Kind of the last node-producing step, skipping `Prepare`.
    let mut previous: Option<&'static str> = None;

    for (index, step) in steps.into_iter().enumerate() {
      let kind = step.kind_name();
      match step {
        Step::Check(checks) => chain.push(NodeKind::Sequential, checks),
        Step::Repeat(count, checks) => chain.push(NodeKind::Repeated { count }, checks),
        Step::Parallel(checks) => chain.push(NodeKind::Parallel, checks),
        Step::If { predicate, checks } => {
          let predicate = predicate.ok_or(ChainError::MissingPredicate { index, kind })?;
          chain.push(NodeKind::Conditional { predicate }, checks);
        }
        Step::ElseIf { predicate, checks } => {
          let predicate = predicate.ok_or(ChainError::MissingPredicate { index, kind })?;
          check_continuation(index, kind, previous)?;
          chain.push(NodeKind::ConditionalElseIf { predicate }, checks);
        }
        Step::Else(checks) => {
          check_continuation(index, kind, previous)?;
          chain.push(NodeKind::ConditionalElse, checks);
        }
        Step::Prepare(context) => {
          chain.context = context;
          continue;
        }
      }
      previous = Some(kind);
    }
    event!(Level::DEBUG, num_nodes = chain.len(), "Chain built from steps.");
    Ok(chain)
  }
}
