//! Shared types for graph documents.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::graph::{Link, LinkEndpoint};

/// A graph as read from JSON.
///
/// Nodes are kept as raw JSON values so any object shape works; the id is
/// read from a configurable field.
///
/// # Example
///
/// ```
/// use dagdepth::parser::types::GraphDocument;
///
/// let json = r#"{"nodes": [{"id": 1, "label": "one"}], "links": []}"#;
/// let doc: GraphDocument = serde_json::from_str(json).unwrap();
/// assert_eq!(doc.node_count(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GraphDocument {
    /// Node objects, in input order.
    #[serde(default)]
    pub nodes: Vec<Value>,

    /// Directed links. `edges` is accepted as an alias.
    #[serde(default, alias = "edges")]
    pub links: Vec<LinkEntry>,
}

impl GraphDocument {
    /// Number of node entries, duplicates included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of link entries.
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Returns true if the document has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Builds the links, borrowing object endpoints from the document.
    pub fn links(&self) -> Vec<Link<'_, Value, String>> {
        self.links
            .iter()
            .map(|entry| {
                Link::from_endpoints(
                    link_endpoint(&entry.source),
                    link_endpoint(&entry.target),
                )
            })
            .collect()
    }
}

/// One link entry. Extra fields (labels, weights) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkEntry {
    pub source: Value,
    pub target: Value,
}

/// Renders a JSON id: strings as-is, everything else in compact JSON.
pub fn render_id(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Reads a node's id from `id_field`.
///
/// Values that are not objects (or lack the field) are used as the id
/// directly.
pub fn node_id(node: &Value, id_field: &str) -> String {
    match node.get(id_field) {
        Some(id) => render_id(id),
        None => render_id(node),
    }
}

/// Classifies one side of a link: objects go through the id accessor,
/// anything else is an id.
pub fn link_endpoint(value: &Value) -> LinkEndpoint<'_, Value, String> {
    if value.is_object() {
        LinkEndpoint::Node(value)
    } else {
        LinkEndpoint::Id(render_id(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_id() {
        assert_eq!(render_id(&json!("a")), "a");
        assert_eq!(render_id(&json!(42)), "42");
        assert_eq!(render_id(&json!(true)), "true");
    }

    #[test]
    fn test_node_id_reads_field() {
        assert_eq!(node_id(&json!({"id": "x", "name": "y"}), "id"), "x");
        assert_eq!(node_id(&json!({"id": "x", "name": "y"}), "name"), "y");
        assert_eq!(node_id(&json!({"key": 3}), "key"), "3");
    }

    #[test]
    fn test_node_id_falls_back_to_value() {
        assert_eq!(node_id(&json!("bare"), "id"), "bare");
        assert_eq!(node_id(&json!(5), "id"), "5");
    }

    #[test]
    fn test_link_endpoint_kinds() {
        let object = json!({"id": "a"});
        assert!(matches!(link_endpoint(&object), LinkEndpoint::Node(_)));

        let raw = json!("a");
        match link_endpoint(&raw) {
            LinkEndpoint::Id(id) => assert_eq!(id, "a"),
            LinkEndpoint::Node(_) => panic!("string endpoint should be an id"),
        }
    }

    #[test]
    fn test_document_defaults() {
        let doc = GraphDocument::default();
        assert!(doc.is_empty());
        assert_eq!(doc.link_count(), 0);
    }

    #[test]
    fn test_edges_alias() {
        let doc: GraphDocument =
            serde_json::from_str(r#"{"nodes": [], "edges": [{"source": 1, "target": 2}]}"#)
                .unwrap();
        assert_eq!(doc.link_count(), 1);
    }

    #[test]
    fn test_links_resolve_with_id_field() {
        let doc: GraphDocument = serde_json::from_str(
            r#"{"nodes": [], "links": [{"source": {"name": "a"}, "target": "b", "weight": 2}]}"#,
        )
        .unwrap();
        let links = doc.links();
        let accessor = |node: &Value| node_id(node, "name");

        assert_eq!(links[0].source.resolve(&accessor), "a");
        assert_eq!(links[0].target.resolve(&accessor), "b");
    }
}
