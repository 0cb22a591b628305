// checkflow/src/core/node.rs

//! Defines a single link of a chain: its kind, its checks, the context handle
//! captured when it was appended, and its optional note and hooks.

use super::check::{CheckFn, Predicate};
use super::context_data::ContextData;
use super::result::CheckResult;
use std::fmt;
use std::sync::Arc;

/// Observer called right before a node executes. Receives the node's note
/// (empty when none was set) and its context.
pub type BeforeHook<T> = Arc<dyn Fn(&str, &ContextData<T>) + Send + Sync + 'static>;

/// Observer called right after a node executes, with the result it stored.
pub type AfterHook<T> = Arc<dyn Fn(&str, &ContextData<T>, &CheckResult) + Send + Sync + 'static>;

/// The behavior of a node.
pub enum NodeKind<T: 'static + Send + Sync> {
  /// Runs every check once, in order.
  Sequential,
  /// Runs the whole check list `count` times.
  Repeated { count: usize },
  /// Runs every check concurrently and joins them all.
  Parallel,
  /// Opens a branch group; runs when its predicate holds.
  Conditional { predicate: Predicate<T> },
  /// Runs when no earlier member of its group matched and its predicate holds.
  ConditionalElseIf { predicate: Predicate<T> },
  /// Runs when no earlier member of its group matched.
  ConditionalElse,
}

impl<T: 'static + Send + Sync> NodeKind<T> {
  pub fn name(&self) -> &'static str {
    match self {
      NodeKind::Sequential => "check",
      NodeKind::Repeated { .. } => "repeat",
      NodeKind::Parallel => "parallel",
      NodeKind::Conditional { .. } => "when",
      NodeKind::ConditionalElseIf { .. } => "or_when",
      NodeKind::ConditionalElse => "otherwise",
    }
  }

  /// True for the members of a branch group that follow its opening node.
  pub fn continues_branch(&self) -> bool {
    matches!(self, NodeKind::ConditionalElseIf { .. } | NodeKind::ConditionalElse)
  }

  /// True for nodes after which `or_when`/`otherwise` may be appended.
  pub fn accepts_branch_continuation(&self) -> bool {
    matches!(self, NodeKind::Conditional { .. } | NodeKind::ConditionalElseIf { .. })
  }
}

impl<T: 'static + Send + Sync> fmt::Debug for NodeKind<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      NodeKind::Repeated { count } => write!(f, "Repeated({})", count),
      other => f.write_str(other.name()),
    }
  }
}

/// Identifies the if/else-if/else group a conditional node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BranchGroup(pub(crate) usize);

/// One link of a chain. Nodes live in the chain's arena in append order; the
/// next node is simply the one at the following index.
pub struct Node<T: 'static + Send + Sync> {
  pub(crate) kind: NodeKind<T>,
  pub(crate) checks: Vec<CheckFn<T>>,
  pub(crate) context: ContextData<T>,
  pub(crate) group: Option<BranchGroup>,
  pub(crate) note: Option<String>,
  pub(crate) before: Option<BeforeHook<T>>,
  pub(crate) after: Option<AfterHook<T>>,
}

impl<T: 'static + Send + Sync> Node<T> {
  pub(crate) fn new(kind: NodeKind<T>, checks: Vec<CheckFn<T>>, context: ContextData<T>) -> Self {
    Self {
      kind,
      checks,
      context,
      group: None,
      note: None,
      before: None,
      after: None,
    }
  }

  pub fn kind(&self) -> &NodeKind<T> {
    &self.kind
  }

  pub fn note(&self) -> &str {
    self.note.as_deref().unwrap_or("")
  }

  pub fn check_count(&self) -> usize {
    self.checks.len()
  }

  pub fn branch_group(&self) -> Option<BranchGroup> {
    self.group
  }
}

impl<T: 'static + Send + Sync> fmt::Debug for Node<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Node")
      .field("kind", &self.kind)
      .field("checks", &self.checks.len())
      .field("group", &self.group)
      .field("note", &self.note)
      .field("before_present", &self.before.is_some())
      .field("after_present", &self.after.is_some())
      .finish()
  }
}
