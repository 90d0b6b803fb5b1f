//! dagdepth - layer depth assignment for directed graphs
//!
//! This crate computes how far every node of a directed graph sits from a
//! root, the numbering layered DAG layouts are drawn from. It handles cycles
//! without looping forever, and lets callers hide nodes from the numbering
//! while keeping them in the topology.

pub mod error;
pub mod export;
pub mod graph;
pub mod parser;

pub use error::{DepthError, Result};
pub use graph::{compute_depths, DepthMap, DepthOptions, Link, LinkEndpoint, SortingOrder};
