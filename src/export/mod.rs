//! Export functionality for depth results.
//!
//! This module provides exporters for writing a computed depth mapping in
//! various formats: JSON, CSV, and Markdown.

pub mod csv;
pub mod json;
pub mod markdown;

use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::graph::{format_cycle, layers, DepthMap, SortingOrder, UNSET_DEPTH};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// JSON format - machine-readable, full data
    #[default]
    Json,
    /// CSV format - one `id,depth` row per node
    Csv,
    /// Markdown format - layer tables for reports
    Markdown,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: json, csv, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// A finished depth computation, ready to be written out.
#[derive(Debug, Clone)]
pub struct DepthReport {
    /// Ordering the depths were computed with
    pub order: SortingOrder,
    /// Final id → depth mapping (skip nodes already removed)
    pub depths: DepthMap<String>,
    /// Cycles the loop handler let through, as id sequences
    pub cycles: Vec<Vec<String>>,
}

impl DepthReport {
    /// Create a report from a depth mapping.
    pub fn new(order: SortingOrder, depths: DepthMap<String>, cycles: Vec<Vec<String>>) -> Self {
        Self {
            order,
            depths,
            cycles,
        }
    }

    /// Rows sorted by depth, then id.
    pub fn rows(&self) -> Vec<(&str, i64)> {
        let mut rows: Vec<(&str, i64)> = self
            .depths
            .iter()
            .map(|(id, &depth)| (id.as_str(), depth))
            .collect();
        rows.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        rows
    }

    /// Ids grouped by depth.
    pub fn layers(&self) -> BTreeMap<i64, Vec<String>> {
        layers(&self.depths)
    }

    /// Deepest assigned depth, if any node was reached.
    pub fn max_depth(&self) -> Option<i64> {
        self.depths.values().copied().filter(|&d| d != UNSET_DEPTH).max()
    }

    /// Number of reported nodes no root reaches.
    pub fn unreached_count(&self) -> usize {
        self.depths.values().filter(|&&d| d == UNSET_DEPTH).count()
    }

    /// Cycles rendered as `a -> b -> a`.
    pub fn cycle_paths(&self) -> Vec<String> {
        self.cycles.iter().map(|c| format_cycle(c)).collect()
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the report to the given writer.
    fn export<W: Write>(&self, report: &DepthReport, writer: &mut W) -> io::Result<()>;
}

/// Export a report in the specified format.
pub fn export<W: Write>(
    format: ExportFormat,
    report: &DepthReport,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Json => json::JsonExporter.export(report, writer),
        ExportFormat::Csv => csv::CsvExporter.export(report, writer),
        ExportFormat::Markdown => markdown::MarkdownExporter.export(report, writer),
    }
}

/// Export a report to a string.
pub fn export_to_string(format: ExportFormat, report: &DepthReport) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, report, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
pub(crate) fn sample_report() -> DepthReport {
    let depths: DepthMap<String> = [("app", 0), ("lib", 1), ("util", 2), ("core", 1), ("orphan", -1)]
        .into_iter()
        .map(|(id, depth)| (id.to_string(), depth))
        .collect();
    DepthReport::new(SortingOrder::DepthFirst, depths, Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!(
            "markdown".parse::<ExportFormat>().unwrap(),
            ExportFormat::Markdown
        );
        assert_eq!(
            "md".parse::<ExportFormat>().unwrap(),
            ExportFormat::Markdown
        );
        assert!("invalid".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_export_format_display() {
        assert_eq!(format!("{}", ExportFormat::Json), "json");
        assert_eq!(format!("{}", ExportFormat::Csv), "csv");
        assert_eq!(format!("{}", ExportFormat::Markdown), "markdown");
    }

    #[test]
    fn test_report_rows_sorted_by_depth_then_id() {
        let report = sample_report();
        let rows = report.rows();
        assert_eq!(
            rows,
            vec![("orphan", -1), ("app", 0), ("core", 1), ("lib", 1), ("util", 2)]
        );
    }

    #[test]
    fn test_report_stats() {
        let report = sample_report();
        assert_eq!(report.max_depth(), Some(2));
        assert_eq!(report.unreached_count(), 1);
        assert_eq!(report.layers()[&1], vec!["core", "lib"]);
    }

    #[test]
    fn test_report_max_depth_when_nothing_reached() {
        let depths: DepthMap<String> = [("a".to_string(), UNSET_DEPTH)].into_iter().collect();
        let report = DepthReport::new(SortingOrder::BreadthFirst, depths, Vec::new());
        assert_eq!(report.max_depth(), None);
    }

    #[test]
    fn test_export_to_string_csv() {
        let out = export_to_string(ExportFormat::Csv, &sample_report()).unwrap();
        assert!(out.starts_with("id,depth\n"));
    }
}
