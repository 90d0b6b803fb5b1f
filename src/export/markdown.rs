//! Markdown export implementation.
//!
//! Writes depth results as Markdown tables for documentation and reporting.

use super::{DepthReport, Exporter};
use crate::graph::UNSET_DEPTH;
use std::io::{self, Write};

/// Markdown exporter implementation.
pub struct MarkdownExporter;

impl Exporter for MarkdownExporter {
    fn export<W: Write>(&self, report: &DepthReport, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "# Depth Report")?;
        writeln!(writer)?;
        writeln!(writer, "**Ordering:** {}", report.order)?;
        writeln!(writer)?;

        // Summary section
        writeln!(writer, "## Summary")?;
        writeln!(writer)?;
        writeln!(writer, "| Metric | Count |")?;
        writeln!(writer, "|--------|-------|")?;
        writeln!(writer, "| Nodes | {} |", report.depths.len())?;
        if let Some(max) = report.max_depth() {
            writeln!(writer, "| Max Depth | {} |", max)?;
        }
        writeln!(writer, "| Unreached | {} |", report.unreached_count())?;
        writeln!(writer, "| Cycles | {} |", report.cycles.len())?;
        writeln!(writer)?;

        // Layers
        let layers = report.layers();
        if !layers.is_empty() {
            writeln!(writer, "## Layers")?;
            writeln!(writer)?;
            writeln!(writer, "| Depth | Nodes |")?;
            writeln!(writer, "|-------|-------|")?;
            for (depth, ids) in &layers {
                let label = if *depth == UNSET_DEPTH {
                    "unreached".to_string()
                } else {
                    depth.to_string()
                };
                writeln!(writer, "| {} | {} |", label, ids.join(", "))?;
            }
            writeln!(writer)?;
        }

        // Cycles
        if !report.cycles.is_empty() {
            writeln!(writer, "## Cycles")?;
            writeln!(writer)?;
            for path in report.cycle_paths() {
                writeln!(writer, "- `{}`", path)?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }
}
