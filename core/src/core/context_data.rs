// checkflow/src/core/context_data.rs

//! Shared handle to the value a chain checks.

use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// A shared, lock-protected handle to the context value seen by checks and conditions.
///
/// Cloning a `ContextData` clones the handle, not the value: every node appended
/// after the same `prepare` call, and every worker of a parallel node, observes
/// the same underlying `T`.
///
/// IMPORTANT: Lock guards are blocking and MUST NOT be held across `.await`
/// suspension points inside a check.
#[derive(Debug)]
pub struct ContextData<T: Send + Sync + 'static>(Arc<RwLock<T>>);

impl<T: Send + Sync + 'static> ContextData<T> {
  pub fn new(data: T) -> Self {
    ContextData(Arc::new(RwLock::new(data)))
  }

  /// Acquires a read lock.
  pub fn read(&self) -> RwLockReadGuard<'_, T> {
    self.0.read()
  }

  /// Acquires a write lock. Checks that run inside a parallel node should not
  /// write through their context.
  pub fn write(&self) -> RwLockWriteGuard<'_, T> {
    self.0.write()
  }

  pub fn try_read(&self) -> Option<RwLockReadGuard<'_, T>> {
    self.0.try_read()
  }

  /// Borrows one part of the context under a read lock.
  /// Example: `ctx.map_read(|order| &order.items)`
  pub fn map_read<F, U: ?Sized>(&self, f: F) -> MappedRwLockReadGuard<'_, U>
  where
    F: FnOnce(&T) -> &U,
  {
    RwLockReadGuard::map(self.read(), f)
  }

  /// True when both handles point at the same context value.
  pub fn same_as(&self, other: &ContextData<T>) -> bool {
    Arc::ptr_eq(&self.0, &other.0)
  }
}

impl<T: Send + Sync + Clone + 'static> ContextData<T> {
  /// Copies the current value out from under the lock.
  pub fn snapshot(&self) -> T {
    self.read().clone()
  }
}

impl<T: Send + Sync + 'static> Clone for ContextData<T> {
  fn clone(&self) -> Self {
    ContextData(Arc::clone(&self.0))
  }
}

impl<T: Send + Sync + 'static> From<T> for ContextData<T> {
  fn from(data: T) -> Self {
    ContextData::new(data)
  }
}

impl<T: Send + Sync + 'static + Default> Default for ContextData<T> {
  fn default() -> Self {
    Self::new(Default::default())
  }
}
