use std::collections::HashSet;
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use dagdepth::export::{self, DepthReport, ExportFormat};
use dagdepth::graph::{compute_depths, format_cycle, DepthOptions, SortingOrder};
use dagdepth::parser::{self, node_id};

#[derive(Parser)]
#[command(name = "dagdepth")]
#[command(version)]
#[command(about = "Assign layer depths to the nodes of a directed graph", long_about = None)]
struct Cli {
    /// Graph document: {"nodes": [...], "links": [{"source": .., "target": ..}]}
    file: PathBuf,

    /// Traversal order: depthFirst (longest path) or breadthFirst (shortest path)
    #[arg(short, long, default_value = "depthFirst")]
    order: SortingOrder,

    /// Node field holding the id
    #[arg(long, default_value = "id")]
    id_field: String,

    /// Leave a node out of the numbering (repeatable); links still pass through it
    #[arg(long = "skip", value_name = "ID")]
    skip: Vec<String>,

    /// Log cycles and keep going instead of failing
    #[arg(long)]
    allow_cycles: bool,

    /// Output format: json, csv or markdown
    #[arg(short, long, default_value = "json")]
    format: ExportFormat,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let doc = parser::parse_file(&cli.file)
        .with_context(|| format!("failed to load {}", cli.file.display()))?;
    let duplicates = parser::validate(&doc, &cli.id_field)?;
    if duplicates > 0 {
        warn!(duplicates, "duplicate node ids, the last definition wins");
    }

    let id_field = cli.id_field.as_str();
    let skip: HashSet<&str> = cli.skip.iter().map(String::as_str).collect();
    let links = doc.links();
    let mut cycles: Vec<Vec<String>> = Vec::new();

    let mut options = DepthOptions::new()
        .with_sorting_order(cli.order)
        .with_node_filter(|node: &Value| !skip.contains(node_id(node, id_field).as_str()));
    if cli.allow_cycles {
        options = options.with_loop_handler(|ids: &[String]| {
            warn!(cycle = %format_cycle(ids), "cycle in node path, edge treated as dead end");
            cycles.push(ids.to_vec());
            Ok(())
        });
    }

    let depths = compute_depths(&doc.nodes, &links, |node| node_id(node, id_field), options)
        .with_context(|| format!("failed to compute depths for {}", cli.file.display()))?;
    info!(
        nodes = depths.len(),
        cycles = cycles.len(),
        order = %cli.order,
        "depths computed"
    );

    let report = DepthReport::new(cli.order, depths, cycles);
    let mut stdout = io::stdout().lock();
    export::export(cli.format, &report, &mut stdout)?;
    stdout.flush()?;

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("DAGDEPTH_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "dagdepth=debug,info"
        } else {
            "dagdepth=info,warn"
        })
    });

    let format = env::var("DAGDEPTH_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(io::stderr))
                .init();
        }
    }
}
