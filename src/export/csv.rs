//! CSV export implementation.
//!
//! Writes one `id,depth` row per node for spreadsheet use.

use super::{DepthReport, Exporter};
use std::io::{self, Write};

/// CSV exporter implementation.
pub struct CsvExporter;

impl CsvExporter {
    /// Escape a field value for CSV format.
    ///
    /// Wraps the value in quotes if it contains commas, quotes, or newlines.
    fn escape_field(value: &str) -> String {
        if value.contains(',') || value.contains('"') || value.contains('\n') {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }
}

impl Exporter for CsvExporter {
    fn export<W: Write>(&self, report: &DepthReport, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "id,depth")?;

        for (id, depth) in report.rows() {
            writeln!(writer, "{},{}", Self::escape_field(id), depth)?;
        }

        Ok(())
    }
}
