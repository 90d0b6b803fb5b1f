//! Depth assignment for directed graphs.
//!
//! [`compute_depths`] takes a node list, a link list and an id accessor, and
//! returns how far each node sits from a root (a node nothing links to).
//! Layered DAG layouts use the result to place nodes in rows.
//!
//! # Example
//!
//! ```rust
//! use dagdepth::graph::{compute_depths, DepthOptions, Link, SortingOrder};
//!
//! let nodes = ["a", "b", "c"];
//! let links = [Link::new("a", "b"), Link::new("a", "c"), Link::new("c", "b")];
//!
//! // depth-first: every node sits on its longest root path
//! let depths = compute_depths(&nodes, &links, |n| *n, DepthOptions::new()).unwrap();
//! assert_eq!(depths[&"b"], 2);
//!
//! // breadth-first: every node sits on its shortest root path
//! let options = DepthOptions::new().with_sorting_order(SortingOrder::BreadthFirst);
//! let depths = compute_depths(&nodes, &links, |n| *n, options).unwrap();
//! assert_eq!(depths[&"b"], 1);
//! ```

mod depth_graph;
mod options;
mod traversal;

use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::hash::Hash;

use tracing::instrument;

use crate::error::Result;

pub use depth_graph::{DepthGraph, Link, LinkEndpoint, NodeRecord, UNSET_DEPTH};
pub use options::{DepthOptions, LoopHandler, NodeFilter, SortingOrder};
pub use traversal::{format_cycle, CycleTracker};

/// Id → depth mapping. Skip nodes are absent; unreached nodes carry
/// [`UNSET_DEPTH`].
pub type DepthMap<Id> = HashMap<Id, i64>;

/// Computes the depth of every counted node.
///
/// Builds the graph, walks it from its roots in the configured order and
/// projects the result, leaving skip nodes out.
///
/// # Errors
///
/// - [`DepthError::MissingSourceNode`](crate::DepthError::MissingSourceNode) /
///   [`DepthError::MissingTargetNode`](crate::DepthError::MissingTargetNode)
///   when a link names an unknown id.
/// - Whatever the loop handler returns; the default handler fails with
///   [`DepthError::CycleDetected`](crate::DepthError::CycleDetected).
#[instrument(skip_all, fields(nodes = nodes.len(), links = links.len()))]
pub fn compute_depths<'a, N, Id, F>(
    nodes: &'a [N],
    links: &[Link<'a, N, Id>],
    id_accessor: F,
    options: DepthOptions<'_, N, Id>,
) -> Result<DepthMap<Id>>
where
    Id: Eq + Hash + Clone + Display,
    F: Fn(&N) -> Id,
{
    let DepthOptions {
        node_filter,
        on_loop_error,
        sorting_order,
    } = options;

    let mut graph = DepthGraph::build(nodes, links, id_accessor, node_filter)?;
    graph.traverse(sorting_order, on_loop_error)?;
    Ok(graph.depths())
}

/// Groups ids by depth, lowest depth first. Ids inside a layer are sorted.
///
/// Unreached nodes end up in the [`UNSET_DEPTH`] layer.
pub fn layers<Id: Ord + Clone>(depths: &DepthMap<Id>) -> BTreeMap<i64, Vec<Id>> {
    let mut layers: BTreeMap<i64, Vec<Id>> = BTreeMap::new();
    for (id, &depth) in depths {
        layers.entry(depth).or_default().push(id.clone());
    }
    for ids in layers.values_mut() {
        ids.sort();
    }
    layers
}
