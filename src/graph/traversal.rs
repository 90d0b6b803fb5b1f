//! Depth assignment over a [`DepthGraph`].
//!
//! The walk is iterative: an explicit stack of frames stands in for the call
//! stack, and an active path tracks the nodes currently under descent so a
//! repeated node is recognised as a cycle instead of being entered again.

use std::fmt::Display;
use std::hash::Hash;

use petgraph::graph::NodeIndex;
use tracing::debug;

use super::depth_graph::{DepthGraph, UNSET_DEPTH};
use super::options::SortingOrder;
use crate::error::Result;

/// Renders a cycle signature as `A -> B -> A`.
pub fn format_cycle<Id: Display>(ids: &[Id]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Remembers reported cycle signatures so each distinct one reaches the
/// loop handler exactly once.
pub struct CycleTracker<Id, H> {
    found: Vec<Vec<Id>>,
    handler: H,
}

impl<Id, H> CycleTracker<Id, H>
where
    Id: PartialEq,
    H: FnMut(&[Id]) -> Result<()>,
{
    /// Creates a tracker forwarding new cycles to `handler`.
    pub fn new(handler: H) -> Self {
        Self {
            found: Vec::new(),
            handler,
        }
    }

    /// Records a cycle signature, calling the handler if it is new.
    ///
    /// Signatures are compared as ordered sequences, so the same loop entered
    /// at a different node counts as a different cycle.
    pub fn report(&mut self, signature: Vec<Id>) -> Result<()> {
        if self.found.contains(&signature) {
            return Ok(());
        }
        self.found.push(signature);
        let signature = &self.found[self.found.len() - 1];
        (self.handler)(signature)
    }

    /// Every distinct signature seen so far, in discovery order.
    pub fn cycles(&self) -> &[Vec<Id>] {
        &self.found
    }

    /// Consumes the tracker, returning the signatures.
    pub fn into_cycles(self) -> Vec<Vec<Id>> {
        self.found
    }
}

/// Nodes under active descent, with an index-addressed membership marker.
struct ActivePath {
    nodes: Vec<NodeIndex>,
    on_path: Vec<bool>,
}

impl ActivePath {
    fn new(node_count: usize) -> Self {
        Self {
            nodes: Vec::new(),
            on_path: vec![false; node_count],
        }
    }

    fn contains(&self, node: NodeIndex) -> bool {
        self.on_path[node.index()]
    }

    fn enter(&mut self, node: NodeIndex) {
        self.nodes.push(node);
        self.on_path[node.index()] = true;
    }

    fn leave(&mut self) {
        if let Some(node) = self.nodes.pop() {
            self.on_path[node.index()] = false;
        }
    }

    /// The path from the first occurrence of `repeated` to the current tip.
    fn loop_from(&self, repeated: NodeIndex) -> &[NodeIndex] {
        let start = self
            .nodes
            .iter()
            .position(|&node| node == repeated)
            .unwrap_or(self.nodes.len());
        &self.nodes[start..]
    }
}

/// One level of the descent. `node` is `None` for the synthetic frame whose
/// children are the roots.
struct Frame {
    node: Option<NodeIndex>,
    next: usize,
    depth: i64,
}

impl<N, Id> DepthGraph<'_, N, Id>
where
    Id: Eq + Hash + Clone + Display,
{
    /// Assigns depths from the root candidates using `order`.
    ///
    /// Cycles are passed to `handler`, once per distinct signature; an `Err`
    /// from the handler aborts the walk. After the rooted walk, nodes that
    /// were never reached are swept for cycles too (they can only hang off a
    /// root-less cycle); the sweep reports but assigns no depths.
    ///
    /// Returns every distinct cycle signature found.
    pub fn traverse<H>(&mut self, order: SortingOrder, handler: H) -> Result<Vec<Vec<Id>>>
    where
        H: FnMut(&[Id]) -> Result<()>,
    {
        let out = self.out_edges();
        let roots = self.root_indices();
        let mut tracker = CycleTracker::new(handler);

        debug!(%order, roots = roots.len(), nodes = self.node_count(), "traversing graph");

        self.walk_from_roots(order, &out, &roots, &mut tracker)?;
        self.sweep_unreached(&out, &mut tracker)?;

        debug!(cycles = tracker.cycles().len(), "traversal finished");
        Ok(tracker.into_cycles())
    }

    fn walk_from_roots<H>(
        &mut self,
        order: SortingOrder,
        out: &[Vec<NodeIndex>],
        roots: &[NodeIndex],
        tracker: &mut CycleTracker<Id, H>,
    ) -> Result<()>
    where
        H: FnMut(&[Id]) -> Result<()>,
    {
        let mut path = ActivePath::new(self.node_count());
        let mut stack = vec![Frame {
            node: None,
            next: 0,
            depth: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let children = match frame.node {
                Some(node) => out[node.index()].as_slice(),
                None => roots,
            };
            let Some(&child) = children.get(frame.next) else {
                if frame.node.is_some() {
                    path.leave();
                }
                stack.pop();
                continue;
            };
            frame.next += 1;
            let depth = frame.depth;

            let descend = match order {
                SortingOrder::DepthFirst => {
                    if path.contains(child) {
                        tracker.report(self.cycle_signature(&path, child))?;
                        false
                    } else if depth > self.graph[child].depth {
                        // only re-enter when a deeper path arrives
                        self.graph[child].depth = depth;
                        true
                    } else {
                        false
                    }
                }
                SortingOrder::BreadthFirst => {
                    let record = &mut self.graph[child];
                    if record.depth == UNSET_DEPTH || record.depth > depth {
                        record.depth = depth;
                    }
                    if path.contains(child) {
                        tracker.report(self.cycle_signature(&path, child))?;
                        false
                    } else {
                        true
                    }
                }
            };

            if descend {
                let child_depth = depth + self.graph[child].depth_step();
                path.enter(child);
                stack.push(Frame {
                    node: Some(child),
                    next: 0,
                    depth: child_depth,
                });
            }
        }

        Ok(())
    }

    fn sweep_unreached<H>(
        &self,
        out: &[Vec<NodeIndex>],
        tracker: &mut CycleTracker<Id, H>,
    ) -> Result<()>
    where
        H: FnMut(&[Id]) -> Result<()>,
    {
        // Reached nodes count as visited so the sweep never leaves the
        // unreached part of the graph.
        let mut visited: Vec<bool> = self.graph.node_weights().map(|n| n.is_reached()).collect();
        let mut path = ActivePath::new(self.node_count());

        for start in self.graph.node_indices() {
            if visited[start.index()] {
                continue;
            }
            visited[start.index()] = true;
            path.enter(start);
            let mut stack = vec![(start, 0usize)];

            while let Some((node, next)) = stack.last_mut() {
                let Some(&child) = out[node.index()].get(*next) else {
                    path.leave();
                    stack.pop();
                    continue;
                };
                *next += 1;

                if path.contains(child) {
                    tracker.report(self.cycle_signature(&path, child))?;
                } else if !visited[child.index()] {
                    visited[child.index()] = true;
                    path.enter(child);
                    stack.push((child, 0));
                }
            }
        }

        Ok(())
    }

    fn cycle_signature(&self, path: &ActivePath, repeated: NodeIndex) -> Vec<Id> {
        path.loop_from(repeated)
            .iter()
            .chain(std::iter::once(&repeated))
            .map(|&idx| self.graph[idx].id.clone())
            .collect()
    }
}
