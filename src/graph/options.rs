//! Caller-facing configuration for a depth computation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::traversal::format_cycle;
use crate::error::{DepthError, Result};

/// Order in which the traversal walks the graph from its roots.
///
/// The two orderings disagree on purpose: depth-first settles every node on
/// the *longest* root path, breadth-first on the *shortest*.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortingOrder {
    /// Recursive descent, re-entered only when a deeper depth arrives.
    #[default]
    DepthFirst,
    /// Exhaustive walk that lowers depths toward the minimum.
    BreadthFirst,
}

impl FromStr for SortingOrder {
    type Err = DepthError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "depthFirst" | "depth-first" | "depth_first" => Ok(SortingOrder::DepthFirst),
            "breadthFirst" | "breadth-first" | "breadth_first" => Ok(SortingOrder::BreadthFirst),
            _ => Err(DepthError::UnsupportedOrdering(s.to_string())),
        }
    }
}

impl fmt::Display for SortingOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortingOrder::DepthFirst => write!(f, "depthFirst"),
            SortingOrder::BreadthFirst => write!(f, "breadthFirst"),
        }
    }
}

/// Callback invoked once per distinct cycle signature.
///
/// Returning `Err` aborts the whole computation; returning `Ok(())` makes the
/// traversal treat the cyclic edge as a dead end and carry on.
pub type LoopHandler<'f, Id> = Box<dyn FnMut(&[Id]) -> Result<()> + 'f>;

/// Predicate deciding whether a node is counted (`true`) or skipped.
pub type NodeFilter<'f, N> = Box<dyn Fn(&N) -> bool + 'f>;

/// Options for [`compute_depths`](super::compute_depths).
///
/// # Example
///
/// ```rust
/// use dagdepth::graph::{DepthOptions, SortingOrder};
///
/// let options: DepthOptions<'_, &str, &str> = DepthOptions::new()
///     .with_sorting_order(SortingOrder::BreadthFirst)
///     .with_node_filter(|node: &&str| !node.starts_with('_'))
///     .warn_on_loops();
/// assert_eq!(options.sorting_order(), SortingOrder::BreadthFirst);
/// ```
pub struct DepthOptions<'f, N, Id> {
    pub(crate) node_filter: NodeFilter<'f, N>,
    pub(crate) on_loop_error: LoopHandler<'f, Id>,
    pub(crate) sorting_order: SortingOrder,
}

impl<'f, N: 'f, Id: fmt::Display + 'f> DepthOptions<'f, N, Id> {
    /// Creates options with every node counted, cycles fatal and
    /// depth-first ordering.
    pub fn new() -> Self {
        Self {
            node_filter: Box::new(|_: &N| true),
            on_loop_error: Box::new(|ids: &[Id]| Err(DepthError::cycle(ids))),
            sorting_order: SortingOrder::default(),
        }
    }

    /// Replaces the node filter. Nodes failing it become skip nodes.
    pub fn with_node_filter(mut self, filter: impl Fn(&N) -> bool + 'f) -> Self {
        self.node_filter = Box::new(filter);
        self
    }

    /// Replaces the loop handler.
    pub fn with_loop_handler(mut self, handler: impl FnMut(&[Id]) -> Result<()> + 'f) -> Self {
        self.on_loop_error = Box::new(handler);
        self
    }

    /// Installs a handler that logs each cycle and keeps going.
    pub fn warn_on_loops(self) -> Self {
        self.with_loop_handler(|ids: &[Id]| {
            tracing::warn!(cycle = %format_cycle(ids), "cycle in node path, edge treated as dead end");
            Ok(())
        })
    }

    /// Sets the traversal order.
    pub fn with_sorting_order(mut self, order: SortingOrder) -> Self {
        self.sorting_order = order;
        self
    }

    /// Sets the traversal order from its textual name.
    ///
    /// Fails with [`DepthError::UnsupportedOrdering`] for unknown names.
    pub fn with_sorting_order_str(self, order: &str) -> Result<Self> {
        Ok(self.with_sorting_order(order.parse()?))
    }
}

impl<N, Id> DepthOptions<'_, N, Id> {
    /// The configured traversal order.
    pub fn sorting_order(&self) -> SortingOrder {
        self.sorting_order
    }
}

impl<'f, N: 'f, Id: fmt::Display + 'f> Default for DepthOptions<'f, N, Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, Id> fmt::Debug for DepthOptions<'_, N, Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DepthOptions")
            .field("sorting_order", &self.sorting_order)
            .finish_non_exhaustive()
    }
}
