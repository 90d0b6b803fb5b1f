//! Parser module for graph documents.
//!
//! Reads the `{ "nodes": [...], "links": [...] }` shape force-graph style
//! visualisations exchange, where each link side is either a node id or a
//! node object.
//!
//! # Example
//!
//! ```
//! use dagdepth::parser::parse_str;
//!
//! let doc = parse_str(r#"{
//!     "nodes": [{"id": "a"}, {"id": "b"}],
//!     "links": [{"source": "a", "target": {"id": "b"}}]
//! }"#).unwrap();
//!
//! assert_eq!(doc.node_count(), 2);
//! assert_eq!(doc.links().len(), 1);
//! ```

pub mod graph_json;
pub mod types;

// Re-export commonly used types for convenience
pub use graph_json::{parse_file, parse_str, validate, ParseError, ParseResult};

pub use types::{link_endpoint, node_id, render_id, GraphDocument, LinkEntry};
