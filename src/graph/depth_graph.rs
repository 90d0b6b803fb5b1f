//! Arena-backed graph built from loosely typed node and link collections.
//!
//! Nodes live in a petgraph `DiGraph`; a `NodeIndex` is the only handle the
//! traversal keeps, so a node reached along two paths is simply the same
//! index seen twice.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use tracing::debug;

use super::DepthMap;
use crate::error::{DepthError, Result};

/// Depth carried by nodes the traversal never reached.
pub const UNSET_DEPTH: i64 = -1;

/// One side of a link: either a raw id or a node object to run the id
/// accessor on.
#[derive(Debug)]
pub enum LinkEndpoint<'a, N, Id> {
    /// The id itself.
    Id(Id),
    /// A node object; its id comes from the id accessor.
    Node(&'a N),
}

impl<N, Id: Clone> LinkEndpoint<'_, N, Id> {
    /// Resolves the endpoint to an id.
    pub fn resolve<F>(&self, id_accessor: &F) -> Id
    where
        F: Fn(&N) -> Id,
    {
        match self {
            LinkEndpoint::Id(id) => id.clone(),
            LinkEndpoint::Node(node) => id_accessor(*node),
        }
    }
}

impl<N, Id: Clone> Clone for LinkEndpoint<'_, N, Id> {
    fn clone(&self) -> Self {
        match self {
            LinkEndpoint::Id(id) => LinkEndpoint::Id(id.clone()),
            LinkEndpoint::Node(node) => LinkEndpoint::Node(*node),
        }
    }
}

/// A directed link from `source` to `target`.
#[derive(Debug)]
pub struct Link<'a, N, Id> {
    pub source: LinkEndpoint<'a, N, Id>,
    pub target: LinkEndpoint<'a, N, Id>,
}

impl<'a, N, Id> Link<'a, N, Id> {
    /// Creates a link between two ids.
    pub fn new(source: Id, target: Id) -> Self {
        Self {
            source: LinkEndpoint::Id(source),
            target: LinkEndpoint::Id(target),
        }
    }

    /// Creates a link between two node objects.
    pub fn between_nodes(source: &'a N, target: &'a N) -> Self {
        Self {
            source: LinkEndpoint::Node(source),
            target: LinkEndpoint::Node(target),
        }
    }

    /// Creates a link from already-built endpoints.
    pub fn from_endpoints(source: LinkEndpoint<'a, N, Id>, target: LinkEndpoint<'a, N, Id>) -> Self {
        Self { source, target }
    }
}

impl<N, Id: Clone> Clone for Link<'_, N, Id> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            target: self.target.clone(),
        }
    }
}

/// Per-node state held in the arena.
#[derive(Debug)]
pub struct NodeRecord<'a, N, Id> {
    /// The caller's node object.
    pub data: &'a N,
    /// Id computed once from `data`.
    pub id: Id,
    /// Current depth, [`UNSET_DEPTH`] until the traversal reaches the node.
    pub depth: i64,
    /// Skip nodes stay in the topology but are neither counted nor reported.
    pub skip: bool,
}

impl<N, Id> NodeRecord<'_, N, Id> {
    /// Returns true once the traversal has assigned a depth.
    pub fn is_reached(&self) -> bool {
        self.depth != UNSET_DEPTH
    }

    /// Depth added for children descending through this node.
    pub(crate) fn depth_step(&self) -> i64 {
        if self.skip {
            0
        } else {
            1
        }
    }
}

/// Directed graph prepared for depth assignment.
///
/// # Example
///
/// ```rust
/// use dagdepth::graph::{DepthGraph, Link, SortingOrder};
///
/// let nodes = ["a", "b", "c"];
/// let links = [Link::new("a", "b"), Link::new("b", "c")];
/// let mut graph = DepthGraph::build(&nodes, &links, |n| *n, |_| true).unwrap();
///
/// assert_eq!(graph.root_ids(), vec![&"a"]);
/// graph
///     .traverse(SortingOrder::DepthFirst, |ids| Err(dagdepth::DepthError::cycle(ids)))
///     .unwrap();
/// assert_eq!(graph.depths()[&"c"], 2);
/// ```
#[derive(Debug)]
pub struct DepthGraph<'a, N, Id> {
    pub(crate) graph: DiGraph<NodeRecord<'a, N, Id>, ()>,
    node_indices: HashMap<Id, NodeIndex>,
    /// Indexed by `NodeIndex::index()`; false once a link targets the node.
    root_candidates: Vec<bool>,
}

impl<'a, N, Id> DepthGraph<'a, N, Id>
where
    Id: Eq + Hash + Clone + Display,
{
    /// Builds the graph from nodes and links.
    ///
    /// Duplicate ids: the last node wins for `data` and `skip`, but keeps the
    /// arena slot and root position of the first occurrence.
    ///
    /// # Errors
    ///
    /// [`DepthError::MissingSourceNode`] or [`DepthError::MissingTargetNode`]
    /// for the first link naming an unknown id.
    pub fn build<F, P>(
        nodes: &'a [N],
        links: &[Link<'a, N, Id>],
        id_accessor: F,
        node_filter: P,
    ) -> Result<Self>
    where
        F: Fn(&N) -> Id,
        P: Fn(&N) -> bool,
    {
        let mut graph = DiGraph::with_capacity(nodes.len(), links.len());
        let mut node_indices: HashMap<Id, NodeIndex> = HashMap::with_capacity(nodes.len());

        for node in nodes {
            let id = id_accessor(node);
            let record = NodeRecord {
                data: node,
                id: id.clone(),
                depth: UNSET_DEPTH,
                skip: !node_filter(node),
            };
            match node_indices.get(&id) {
                Some(&idx) => {
                    debug!(id = %id, "duplicate node id, keeping the last definition");
                    graph[idx] = record;
                }
                None => {
                    let idx = graph.add_node(record);
                    node_indices.insert(id, idx);
                }
            }
        }

        let mut root_candidates = vec![true; graph.node_count()];
        for link in links {
            let source_id = link.source.resolve(&id_accessor);
            let target_id = link.target.resolve(&id_accessor);

            let source = *node_indices
                .get(&source_id)
                .ok_or_else(|| DepthError::MissingSourceNode(source_id.to_string()))?;
            let target = *node_indices
                .get(&target_id)
                .ok_or_else(|| DepthError::MissingTargetNode(target_id.to_string()))?;

            graph.add_edge(source, target, ());
            root_candidates[target.index()] = false;
        }

        Ok(Self {
            graph,
            node_indices,
            root_candidates,
        })
    }

    /// Number of distinct nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of links, duplicates included.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Looks up a node by id.
    pub fn node(&self, id: &Id) -> Option<&NodeRecord<'a, N, Id>> {
        self.node_indices.get(id).map(|&idx| &self.graph[idx])
    }

    /// All node records in input order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeRecord<'a, N, Id>> {
        self.graph.node_weights()
    }

    /// Ids of the nodes with no incoming link, in input order.
    pub fn root_ids(&self) -> Vec<&Id> {
        self.root_indices()
            .into_iter()
            .map(|idx| &self.graph[idx].id)
            .collect()
    }

    /// Structural cycle check over the whole graph, independent of roots.
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Projects the graph into an id → depth map, leaving out skip nodes.
    ///
    /// Unreached nodes are reported with [`UNSET_DEPTH`].
    pub fn depths(&self) -> DepthMap<Id> {
        self.graph
            .node_weights()
            .filter(|node| !node.skip)
            .map(|node| (node.id.clone(), node.depth))
            .collect()
    }

    pub(crate) fn root_indices(&self) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|idx| self.root_candidates[idx.index()])
            .collect()
    }

    /// Outgoing adjacency, one list per node, in link order.
    pub(crate) fn out_edges(&self) -> Vec<Vec<NodeIndex>> {
        self.graph
            .node_indices()
            .map(|idx| {
                let mut edges: Vec<_> = self
                    .graph
                    .edges_directed(idx, Direction::Outgoing)
                    .map(|edge| (edge.id(), edge.target()))
                    .collect();
                edges.sort_by_key(|(edge, _)| *edge);
                edges.into_iter().map(|(_, target)| target).collect()
            })
            .collect()
    }
}
