//! JSON export implementation.
//!
//! Writes depth results in JSON format for machine-readable output.

use super::{DepthReport, Exporter};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

/// Serializable cycle for JSON output.
#[derive(Serialize)]
struct JsonCycle {
    nodes: Vec<String>,
    path: String,
}

/// Serializable layer for JSON output.
#[derive(Serialize)]
struct JsonLayer {
    depth: i64,
    nodes: Vec<String>,
}

/// Summary statistics for JSON output.
#[derive(Serialize)]
struct JsonSummary {
    nodes: usize,
    layers: usize,
    unreached: usize,
    cycles: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_depth: Option<i64>,
}

/// Root JSON export structure.
#[derive(Serialize)]
struct JsonExport {
    order: String,
    summary: JsonSummary,
    depths: BTreeMap<String, i64>,
    layers: Vec<JsonLayer>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    cycles: Vec<JsonCycle>,
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, report: &DepthReport, writer: &mut W) -> io::Result<()> {
        let layers: Vec<JsonLayer> = report
            .layers()
            .into_iter()
            .map(|(depth, nodes)| JsonLayer { depth, nodes })
            .collect();

        let cycles: Vec<JsonCycle> = report
            .cycles
            .iter()
            .zip(report.cycle_paths())
            .map(|(nodes, path)| JsonCycle {
                nodes: nodes.clone(),
                path,
            })
            .collect();

        let export = JsonExport {
            order: report.order.to_string(),
            summary: JsonSummary {
                nodes: report.depths.len(),
                layers: layers.len(),
                unreached: report.unreached_count(),
                cycles: report.cycles.len(),
                max_depth: report.max_depth(),
            },
            depths: report
                .depths
                .iter()
                .map(|(id, &depth)| (id.clone(), depth))
                .collect(),
            layers,
            cycles,
        };

        let json = serde_json::to_string_pretty(&export)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}
