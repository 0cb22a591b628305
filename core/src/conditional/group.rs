// checkflow/src/conditional/group.rs

//! Walk-time state of if/else-if/else groups.

use crate::core::node::BranchGroup;

/// Tracks which branch groups already had a member match during one walk.
/// Once a group is resolved, its remaining members are bypassed without
/// evaluating their predicates.
#[derive(Debug)]
pub(crate) struct BranchGroups {
  resolved: Vec<bool>,
}

impl BranchGroups {
  pub(crate) fn new(groups: usize) -> Self {
    Self {
      resolved: vec![false; groups],
    }
  }

  /// Nodes outside any group are never resolved.
  pub(crate) fn is_resolved(&self, group: Option<BranchGroup>) -> bool {
    group.map_or(false, |BranchGroup(id)| self.resolved.get(id).copied().unwrap_or(false))
  }

  pub(crate) fn resolve(&mut self, BranchGroup(id): BranchGroup) {
    if let Some(slot) = self.resolved.get_mut(id) {
      *slot = true;
    }
  }
}
