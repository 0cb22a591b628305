// checkflow/src/chain/hooks.rs

//! Notes and observers. `note`, `before` and `after` apply to the most
//! recently appended node; `before_each`/`after_each` fill in the nodes
//! appended so far that lack their own; `on_success`/`on_failure` run once
//! when the chain finishes.

use crate::chain::definition::Chain;
use crate::core::context_data::ContextData;
use crate::core::node::{AfterHook, BeforeHook, Node};
use crate::core::result::CheckResult;
use std::sync::Arc;
use tracing::{event, Level};

/// Observer called once by `wait` with the chain's current context and its
/// final result.
pub type OutcomeHook<T> = Arc<dyn Fn(&ContextData<T>, &CheckResult) + Send + Sync + 'static>;

impl<T> Chain<T>
where
  T: 'static + Send + Sync,
{
  fn last_node_mut(&mut self, what: &str) -> Option<&mut Node<T>> {
    let last = self.nodes.last_mut();
    if last.is_none() {
      event!(Level::WARN, setting = what, "No node appended yet; ignoring.");
    }
    last
  }

  /// Labels the most recently appended node. The note shows up in tracing
  /// spans and is passed to node hooks.
  pub fn note(mut self, note: impl Into<String>) -> Self {
    if let Some(node) = self.last_node_mut("note") {
      node.note = Some(note.into());
    }
    self
  }

  /// Observes the most recently appended node right before it executes.
  pub fn before(mut self, hook: impl Fn(&str, &ContextData<T>) + Send + Sync + 'static) -> Self {
    if let Some(node) = self.last_node_mut("before") {
      node.before = Some(Arc::new(hook));
    }
    self
  }

  /// Observes the most recently appended node right after it executes.
  pub fn after(mut self, hook: impl Fn(&str, &ContextData<T>, &CheckResult) + Send + Sync + 'static) -> Self {
    if let Some(node) = self.last_node_mut("after") {
      node.after = Some(Arc::new(hook));
    }
    self
  }

  /// Fills in the `before` observer of every node appended so far that has
  /// none of its own. Nodes appended after this call are not affected.
  pub fn before_each(mut self, hook: impl Fn(&str, &ContextData<T>) + Send + Sync + 'static) -> Self {
    let hook: BeforeHook<T> = Arc::new(hook);
    for node in self.nodes.iter_mut().filter(|node| node.before.is_none()) {
      node.before = Some(hook.clone());
    }
    self
  }

  /// Fills in the `after` observer of every node appended so far that has
  /// none of its own. Nodes appended after this call are not affected.
  pub fn after_each(mut self, hook: impl Fn(&str, &ContextData<T>, &CheckResult) + Send + Sync + 'static) -> Self {
    let hook: AfterHook<T> = Arc::new(hook);
    for node in self.nodes.iter_mut().filter(|node| node.after.is_none()) {
      node.after = Some(hook.clone());
    }
    self
  }

  pub fn on_success(mut self, hook: impl Fn(&ContextData<T>, &CheckResult) + Send + Sync + 'static) -> Self {
    self.on_success = Some(Arc::new(hook));
    self
  }

  pub fn on_failure(mut self, hook: impl Fn(&ContextData<T>, &CheckResult) + Send + Sync + 'static) -> Self {
    self.on_failure = Some(Arc::new(hook));
    self
  }
}
