// checkflow/src/conditional/builder.rs

//! Implements `BranchBuilder`, the handle returned while inside an
//! if/else-if/else group.
//!
//! From a `BranchBuilder` the group can be continued with `or_when` or closed
//! with `otherwise`. Any chain-level append (`check`, `repeat`, `parallel`)
//! closes the group implicitly and hands back the [`Chain`]; `when` opens a new
//! group right away.

use crate::chain::definition::Chain;
use crate::core::check::{CheckFn, Condition, Predicate};
use crate::core::context_data::ContextData;
use crate::core::node::NodeKind;
use crate::core::result::CheckResult;

/// Builder handle for an open branch group of a `Chain<T>`.
pub struct BranchBuilder<T>
where
  T: 'static + Send + Sync,
{
  chain: Chain<T>,
}

impl<T> BranchBuilder<T>
where
  T: 'static + Send + Sync,
{
  pub(crate) fn new(chain: Chain<T>) -> Self {
    Self { chain }
  }

  /// Adds an else-if arm: runs when no earlier arm of this group matched and
  /// `predicate` holds.
  pub fn or_when(mut self, predicate: impl Condition<T>, checks: impl IntoIterator<Item = CheckFn<T>>) -> Self {
    self.chain.push(
      NodeKind::ConditionalElseIf {
        predicate: Predicate::new(predicate),
      },
      checks,
    );
    self
  }

  /// Adds the else arm and closes the group.
  pub fn otherwise(mut self, checks: impl IntoIterator<Item = CheckFn<T>>) -> Chain<T> {
    self.chain.push(NodeKind::ConditionalElse, checks);
    self.chain
  }

  /// Closes the group without an else arm.
  pub fn end(self) -> Chain<T> {
    self.chain
  }

  pub fn check(self, checks: impl IntoIterator<Item = CheckFn<T>>) -> Chain<T> {
    self.chain.check(checks)
  }

  pub fn repeat(self, count: usize, checks: impl IntoIterator<Item = CheckFn<T>>) -> Chain<T> {
    self.chain.repeat(count, checks)
  }

  pub fn parallel(self, checks: impl IntoIterator<Item = CheckFn<T>>) -> Chain<T> {
    self.chain.parallel(checks)
  }

  /// Closes this group and opens a new one.
  pub fn when(self, predicate: impl Condition<T>, checks: impl IntoIterator<Item = CheckFn<T>>) -> BranchBuilder<T> {
    self.chain.when(predicate, checks)
  }

  pub fn prepare(self, context: impl Into<ContextData<T>>) -> Self {
    Self::new(self.chain.prepare(context))
  }

  pub fn prepare_with<F>(self, f: F) -> Self
  where
    F: FnOnce(&T) -> Option<T>,
  {
    Self::new(self.chain.prepare_with(f))
  }

  pub fn note(self, note: impl Into<String>) -> Self {
    Self::new(self.chain.note(note))
  }

  pub fn before(self, hook: impl Fn(&str, &ContextData<T>) + Send + Sync + 'static) -> Self {
    Self::new(self.chain.before(hook))
  }

  pub fn after(self, hook: impl Fn(&str, &ContextData<T>, &CheckResult) + Send + Sync + 'static) -> Self {
    Self::new(self.chain.after(hook))
  }

  pub fn before_each(self, hook: impl Fn(&str, &ContextData<T>) + Send + Sync + 'static) -> Self {
    Self::new(self.chain.before_each(hook))
  }

  pub fn after_each(self, hook: impl Fn(&str, &ContextData<T>, &CheckResult) + Send + Sync + 'static) -> Self {
    Self::new(self.chain.after_each(hook))
  }

  pub fn on_success(self, hook: impl Fn(&ContextData<T>, &CheckResult) + Send + Sync + 'static) -> Self {
    Self::new(self.chain.on_success(hook))
  }

  pub fn on_failure(self, hook: impl Fn(&ContextData<T>, &CheckResult) + Send + Sync + 'static) -> Self {
    Self::new(self.chain.on_failure(hook))
  }

  pub fn len(&self) -> usize {
    self.chain.len()
  }

  pub fn is_empty(&self) -> bool {
    self.chain.is_empty()
  }

  /// Runs the chain. See [`Chain::wait`].
  pub async fn wait(self) -> CheckResult {
    self.chain.wait().await
  }
}
