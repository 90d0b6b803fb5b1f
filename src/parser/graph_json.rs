//! Parser for JSON graph documents.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::types::{node_id, GraphDocument};

/// Errors that can occur while reading a graph document.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Failed to read the file from disk.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse JSON content.
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The document parsed but cannot describe a graph.
    #[error("Invalid graph document: {0}")]
    InvalidDocument(String),
}

/// Result type alias for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a graph document from a file path.
///
/// ```ignore
/// use std::path::Path;
/// use dagdepth::parser::parse_file;
///
/// let doc = parse_file(Path::new("graph.json")).unwrap();
/// println!("{} nodes", doc.node_count());
/// ```
pub fn parse_file(path: &Path) -> ParseResult<GraphDocument> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parses a graph document from a string.
///
/// ```
/// use dagdepth::parser::graph_json::parse_str;
///
/// let doc = parse_str(r#"{"nodes": [{"id": "a"}], "links": []}"#).unwrap();
/// assert_eq!(doc.node_count(), 1);
/// ```
pub fn parse_str(content: &str) -> ParseResult<GraphDocument> {
    let doc: GraphDocument = serde_json::from_str(content)?;
    Ok(doc)
}

/// Checks that every node is an object carrying `id_field`.
///
/// Duplicate ids are allowed (the last definition wins during depth
/// computation) but are counted in the returned value so callers can warn.
pub fn validate(doc: &GraphDocument, id_field: &str) -> ParseResult<usize> {
    let mut seen = HashSet::with_capacity(doc.nodes.len());
    let mut duplicates = 0;

    for (position, node) in doc.nodes.iter().enumerate() {
        if !node.is_object() {
            return Err(ParseError::InvalidDocument(format!(
                "node #{position} is not an object"
            )));
        }
        if node.get(id_field).is_none() {
            return Err(ParseError::InvalidDocument(format!(
                "node #{position} has no \"{id_field}\" field"
            )));
        }
        if !seen.insert(node_id(node, id_field)) {
            duplicates += 1;
        }
    }

    Ok(duplicates)
}
