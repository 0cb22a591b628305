// checkflow/src/conditional/mod.rs

//! If/else-if/else support: the `BranchBuilder` handle returned by
//! `Chain::when`, and the walk-time tracking of branch groups.

pub mod builder;
pub(crate) mod group;

pub use builder::BranchBuilder;
