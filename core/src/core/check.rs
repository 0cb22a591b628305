// checkflow/src/core/check.rs

//! Collaborator contracts consumed by the engine: the `Check` trait for
//! check functions and the `Condition` trait for branch predicates, plus the
//! cloneable handles (`CheckFn`, `Predicate`) that nodes store.

use crate::core::context_data::ContextData;
use crate::core::result::CheckResult;
use async_trait::async_trait;
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

/// A single check over the chain's context.
///
/// Checks may have external side effects but report outward only through the
/// returned [`CheckResult`]. A check must return promptly: the engine offers
/// no cancellation hook, and a check that never finishes hangs its chain.
#[async_trait]
pub trait Check<T>: Send + Sync + 'static
where
  T: 'static + Send + Sync,
{
  async fn check(&self, ctx: ContextData<T>) -> CheckResult;
}

/// Adapts an async closure `Fn(ContextData<T>) -> impl Future<Output = CheckResult>`.
pub struct AsyncFnCheck<T, F, Fut>
where
  T: 'static + Send + Sync,
  F: Fn(ContextData<T>) -> Fut + Send + Sync + 'static,
  Fut: Future<Output = CheckResult> + Send + 'static,
{
  f: F,
  _phantom: PhantomData<fn(ContextData<T>) -> Fut>,
}

#[async_trait]
impl<T, F, Fut> Check<T> for AsyncFnCheck<T, F, Fut>
where
  T: 'static + Send + Sync,
  F: Fn(ContextData<T>) -> Fut + Send + Sync + 'static,
  Fut: Future<Output = CheckResult> + Send + 'static,
{
  async fn check(&self, ctx: ContextData<T>) -> CheckResult {
    (self.f)(ctx).await
  }
}

/// Adapts a plain closure `Fn(ContextData<T>) -> CheckResult`.
pub struct SyncFnCheck<T, F>
where
  T: 'static + Send + Sync,
  F: Fn(ContextData<T>) -> CheckResult + Send + Sync + 'static,
{
  f: F,
  _phantom: PhantomData<fn(ContextData<T>)>,
}

#[async_trait]
impl<T, F> Check<T> for SyncFnCheck<T, F>
where
  T: 'static + Send + Sync,
  F: Fn(ContextData<T>) -> CheckResult + Send + Sync + 'static,
{
  async fn check(&self, ctx: ContextData<T>) -> CheckResult {
    (self.f)(ctx)
  }
}

/// Cloneable, type-erased handle to a [`Check`]. Nodes store these; the same
/// `CheckFn` may appear in several nodes.
pub struct CheckFn<T: 'static + Send + Sync>(Arc<dyn Check<T>>);

impl<T: 'static + Send + Sync> CheckFn<T> {
  /// Wraps an async closure.
  pub fn new<F, Fut>(f: F) -> Self
  where
    F: Fn(ContextData<T>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = CheckResult> + Send + 'static,
  {
    CheckFn(Arc::new(AsyncFnCheck { f, _phantom: PhantomData }))
  }

  /// Wraps a synchronous closure.
  pub fn from_sync<F>(f: F) -> Self
  where
    F: Fn(ContextData<T>) -> CheckResult + Send + Sync + 'static,
  {
    CheckFn(Arc::new(SyncFnCheck { f, _phantom: PhantomData }))
  }

  /// Wraps a user type implementing [`Check`].
  pub fn from_check(check: impl Check<T>) -> Self {
    CheckFn(Arc::new(check))
  }

  pub(crate) async fn run(&self, ctx: ContextData<T>) -> CheckResult {
    self.0.check(ctx).await
  }
}

impl<T: 'static + Send + Sync> Clone for CheckFn<T> {
  fn clone(&self) -> Self {
    CheckFn(Arc::clone(&self.0))
  }
}

impl<T: 'static + Send + Sync> fmt::Debug for CheckFn<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("CheckFn(..)")
  }
}

/// A branch predicate. Must be free of side effects that matter to the chain;
/// only its boolean outcome is used.
pub trait Condition<T>: Send + Sync + 'static
where
  T: 'static + Send + Sync,
{
  fn evaluate(&self, ctx: ContextData<T>) -> bool;
}

impl<T, F> Condition<T> for F
where
  T: 'static + Send + Sync,
  F: Fn(ContextData<T>) -> bool + Send + Sync + 'static,
{
  fn evaluate(&self, ctx: ContextData<T>) -> bool {
    self(ctx)
  }
}

/// Cloneable handle to a [`Condition`], stored on `when`/`or_when` nodes.
pub struct Predicate<T: 'static + Send + Sync>(Arc<dyn Condition<T>>);

impl<T: 'static + Send + Sync> Predicate<T> {
  pub fn new(condition: impl Condition<T>) -> Self {
    Predicate(Arc::new(condition))
  }
}

impl<T: 'static + Send + Sync> Condition<T> for Predicate<T> {
  fn evaluate(&self, ctx: ContextData<T>) -> bool {
    self.0.evaluate(ctx)
  }
}

impl<T: 'static + Send + Sync> Clone for Predicate<T> {
  fn clone(&self) -> Self {
    Predicate(Arc::clone(&self.0))
  }
}

impl<T: 'static + Send + Sync> fmt::Debug for Predicate<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Predicate(..)")
  }
}
