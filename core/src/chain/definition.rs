// checkflow/src/chain/definition.rs

//! Contains the `Chain<T>` struct and the methods that append nodes to it.

use crate::chain::hooks::OutcomeHook;
use crate::conditional::builder::BranchBuilder;
use crate::core::check::{CheckFn, Condition, Predicate};
use crate::core::context_data::ContextData;
use crate::core::node::{BranchGroup, Node, NodeKind};
use crate::core::result::ResultCell;
use tracing::{event, Level};

/// An ordered chain of check nodes over a context of type `T`.
///
/// `Chain` is the main builder handle. `check`, `repeat` and `parallel` append
/// a node and hand the chain back; `when` opens an if/else-if/else group and
/// returns a [`BranchBuilder`]. Nothing runs until [`Chain::wait`], which
/// consumes the chain.
pub struct Chain<T>
where
  T: 'static + Send + Sync,
{
  /// Context handed to nodes appended from now on.
  pub(crate) context: ContextData<T>,

  /// Node arena; append order is execution order.
  pub(crate) nodes: Vec<Node<T>>,

  pub(crate) result: ResultCell,

  /// Number of branch groups opened so far; also the id of the next one.
  pub(crate) groups_opened: usize,

  pub(crate) on_success: Option<OutcomeHook<T>>,
  pub(crate) on_failure: Option<OutcomeHook<T>>,
}

impl<T> Chain<T>
where
  T: 'static + Send + Sync,
{
  /// Creates an empty chain whose first nodes will see `context`.
  pub fn new(context: impl Into<ContextData<T>>) -> Self {
    Self {
      context: context.into(),
      nodes: Vec::new(),
      result: ResultCell::new(),
      groups_opened: 0,
      on_success: None,
      on_failure: None,
    }
  }

  /// Replaces the context for nodes appended after this call. Nodes already in
  /// the chain keep the handle they were built with.
  pub fn prepare(mut self, context: impl Into<ContextData<T>>) -> Self {
    self.context = context.into();
    event!(Level::TRACE, appended_nodes = self.nodes.len(), "Context prepared.");
    self
  }

  /// Derives the next context from the current value. Returning `None` keeps
  /// the current handle.
  pub fn prepare_with<F>(self, f: F) -> Self
  where
    F: FnOnce(&T) -> Option<T>,
  {
    let next = f(&self.context.read());
    match next {
      Some(data) => self.prepare(ContextData::new(data)),
      None => self,
    }
  }

  /// Appends a node that runs `checks` once, in order, stopping at the first failure.
  pub fn check(mut self, checks: impl IntoIterator<Item = CheckFn<T>>) -> Self {
    self.push(NodeKind::Sequential, checks);
    self
  }

  /// Appends a node that runs the whole check list `count` times.
  pub fn repeat(mut self, count: usize, checks: impl IntoIterator<Item = CheckFn<T>>) -> Self {
    self.push(NodeKind::Repeated { count }, checks);
    self
  }

  /// Appends a node that runs every check concurrently and waits for all of them.
  pub fn parallel(mut self, checks: impl IntoIterator<Item = CheckFn<T>>) -> Self {
    self.push(NodeKind::Parallel, checks);
    self
  }

  /// Opens an if/else-if/else group: `checks` run only when `predicate` holds.
  pub fn when(
    mut self,
    predicate: impl Condition<T>,
    checks: impl IntoIterator<Item = CheckFn<T>>,
  ) -> BranchBuilder<T> {
    self.push(
      NodeKind::Conditional {
        predicate: Predicate::new(predicate),
      },
      checks,
    );
    BranchBuilder::new(self)
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  pub fn nodes(&self) -> &[Node<T>] {
    &self.nodes
  }

  /// Context that the next appended node will capture.
  pub fn context(&self) -> &ContextData<T> {
    &self.context
  }

  /// Appends a node and links it into its branch group. `when` opens a new
  /// group; `or_when`/`otherwise` join the group of the node before them.
  pub(crate) fn push(&mut self, kind: NodeKind<T>, checks: impl IntoIterator<Item = CheckFn<T>>) {
    let group = match &kind {
      NodeKind::Conditional { .. } => {
        let group = BranchGroup(self.groups_opened);
        self.groups_opened += 1;
        Some(group)
      }
      k if k.continues_branch() => self.nodes.last().and_then(|prev| prev.group),
      _ => None,
    };

    let mut node = Node::new(kind, checks.into_iter().collect(), self.context.clone());
    node.group = group;

    event!(
      Level::TRACE,
      node_index = self.nodes.len(),
      kind = node.kind.name(),
      num_checks = node.checks.len(),
      group = ?node.group,
      "Node appended."
    );
    self.nodes.push(node);
  }
}
