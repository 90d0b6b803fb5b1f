//! Error types for depth computation.

use thiserror::Error;

/// Errors raised while building or traversing a depth graph.
///
/// Ids are carried in their rendered (`Display`) form so the error type
/// does not depend on the caller's id type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DepthError {
    /// A link's source side names an id that is not among the nodes.
    #[error("Missing source node with id: {0}")]
    MissingSourceNode(String),

    /// A link's target side names an id that is not among the nodes.
    #[error("Missing target node with id: {0}")]
    MissingTargetNode(String),

    /// The sorting order is neither `depthFirst` nor `breadthFirst`.
    #[error("Unsupported dagNodeSortingOrder: {0}")]
    UnsupportedOrdering(String),

    /// The traversal ran into a cycle and the loop handler refused it.
    #[error("Invalid DAG structure! Found cycle in node path: {path}.")]
    CycleDetected {
        /// Arrow-joined id sequence, e.g. `A -> B -> A`.
        path: String,
        /// The same sequence as individual ids.
        ids: Vec<String>,
    },
}

impl DepthError {
    /// Builds a [`DepthError::CycleDetected`] from an ordered cycle signature.
    pub fn cycle<Id: std::fmt::Display>(ids: &[Id]) -> Self {
        let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
        Self::CycleDetected {
            path: ids.join(" -> "),
            ids,
        }
    }

    /// Returns true for the cycle condition, the only non-structural error.
    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::CycleDetected { .. })
    }
}

/// Result type alias for depth operations.
pub type Result<T> = std::result::Result<T, DepthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_node_messages_name_the_side() {
        assert_eq!(
            DepthError::MissingSourceNode("x".to_string()).to_string(),
            "Missing source node with id: x"
        );
        assert_eq!(
            DepthError::MissingTargetNode("7".to_string()).to_string(),
            "Missing target node with id: 7"
        );
    }

    #[test]
    fn test_cycle_error_message() {
        let err = DepthError::cycle(&["A", "B", "A"]);
        assert!(err.is_cycle());
        assert_eq!(
            err.to_string(),
            "Invalid DAG structure! Found cycle in node path: A -> B -> A."
        );
        match err {
            DepthError::CycleDetected { ids, .. } => assert_eq!(ids, vec!["A", "B", "A"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_ordering_message() {
        let err = DepthError::UnsupportedOrdering("sideways".to_string());
        assert!(!err.is_cycle());
        assert_eq!(err.to_string(), "Unsupported dagNodeSortingOrder: sideways");
    }
}
