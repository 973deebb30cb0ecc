//! Core graph data structures

mod edge;
mod node;
mod temporal;

#[cfg(test)]
mod tests;

pub use edge::{EdgeKey, Relationship};
pub use node::{Attributes, Node, NodeId};
pub use temporal::{TemporalGraph, DEFAULT_WEIGHT_DELTA};
