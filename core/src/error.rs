// checkflow/src/error.rs
use thiserror::Error;

/// Construction errors. These are reported before any chain state exists; a
/// chain that was built successfully never produces one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChainError {
  #[error("Step {index} ('{kind}') has no predicate")]
  MissingPredicate { index: usize, kind: &'static str },

  #[error("Step {index} ('{kind}') continues a branch but has no preceding step")]
  BranchWithoutPredecessor { index: usize, kind: &'static str },

  #[error("Step {index} ('{kind}') must follow a 'when' or 'or_when' step, found '{previous}'")]
  OrphanBranch {
    index: usize,
    kind: &'static str,
    previous: &'static str,
  },
}

pub type ChainResult<T, E = ChainError> = std::result::Result<T, E>;
