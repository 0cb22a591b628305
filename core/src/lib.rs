// src/lib.rs

//! Checkflow: an ASYNC engine for composable check chains.
//!
//! A chain is an ordered list of nodes over a shared context. Each node runs
//! one or more checks and the chain stops at the first failure. Supported
//! node kinds:
//!  - Sequential checks, run once in order.
//!  - Repeated checks, the whole list run a fixed number of times.
//!  - Parallel checks, fanned out as tokio tasks and joined before inspection.
//!  - If/else-if/else groups, where at most one member's checks run.
//!
//! Chains are assembled with a fluent builder (`Chain::new(..).check(..)`) or
//! from a validated `Step` list, and executed once with `Chain::wait`.

pub mod chain;
pub mod conditional;
pub mod core;
pub mod error;

// --- Re-exports for the Public API ---

pub use crate::core::check::{Check, CheckFn, Condition, Predicate};
pub use crate::core::context_data::ContextData;
pub use crate::core::node::{AfterHook, BeforeHook, BranchGroup, Node, NodeKind};
pub use crate::core::result::{CheckResult, ResultCell};

pub use crate::chain::{Chain, OutcomeHook, Step};
pub use crate::conditional::BranchBuilder;

pub use crate::error::{ChainError, ChainResult};
