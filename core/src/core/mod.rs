pub mod check;
pub mod context_data;
pub mod node;
pub mod result;

// Re-export key types for easier access from other checkflow modules (and lib.rs)
pub use check::{Check, CheckFn, Condition, Predicate};
pub use context_data::ContextData;
pub use node::{AfterHook, BeforeHook, BranchGroup, Node, NodeKind};
pub use result::{CheckResult, ResultCell};
