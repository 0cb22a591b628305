// checkflow/src/chain/mod.rs

//! Defines the `Chain<T>` builder, its declarative step-list constructor,
//! its hooks and its execution.

pub mod definition;
pub mod execution;
pub mod hooks;
pub(crate) mod parallel;
pub mod steps;

pub use definition::Chain;
pub use hooks::OutcomeHook;
pub use steps::Step;
