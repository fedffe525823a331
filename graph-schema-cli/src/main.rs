//! Command-line front-end for schema inference.
//!
//! Loads a JSON graph document into an in-memory graph, runs the scan,
//! and prints one row per (label combination | relationship type,
//! property) as JSON lines or an aligned table.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use graph_schema_core::MemoryGraph;
use graph_schema_scan::{compute_schema, ScanOptions, SchemaRow, DEFAULT_BATCH_SIZE};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "graph-schema", version, about = "Infer the schema of a property graph")]
struct Cli {
    /// Path to a JSON graph document.
    graph: PathBuf,

    /// Entities per unit of work.
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Maximum units executing at once (default: available parallelism).
    #[arg(long)]
    max_concurrency: Option<usize>,

    /// Per-unit timeout in seconds (default: wait unconditionally).
    #[arg(long)]
    unit_timeout_secs: Option<u64>,

    /// Output format.
    #[arg(long, value_enum, default_value = "jsonl")]
    format: Format,

    /// Show info-level logs on stderr.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all logs.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One JSON object per row.
    Jsonl,
    /// Aligned text table.
    Table,
}

fn init_tracing(cli: &Cli) {
    // --quiet → off; --verbose → info (RUST_LOG honoured); default → off
    // so piped jsonl output stays clean.
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new("off")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn print_jsonl(rows: &[SchemaRow]) -> anyhow::Result<()> {
    for row in rows {
        println!("{}", serde_json::to_string(row)?);
    }
    Ok(())
}

fn print_table(rows: &[SchemaRow]) {
    let header = ["TYPE", "LABELS", "PROPERTY", "CYPHERTYPE"];
    let rendered: Vec<[String; 4]> = rows
        .iter()
        .map(|row| {
            [
                row.kind.to_string(),
                format!("[{}]", row.labels.join(", ")),
                row.property.clone(),
                row.cypher_type.clone(),
            ]
        })
        .collect();

    let mut widths = header.map(str::len);
    for row in &rendered {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.len());
        }
    }

    let print_line = |cells: [&str; 4]| {
        println!(
            "{:<w0$}  {:<w1$}  {:<w2$}  {:<w3$}",
            cells[0],
            cells[1],
            cells[2],
            cells[3],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
            w3 = widths[3],
        );
    };

    print_line(header);
    for row in &rendered {
        print_line([&row[0], &row[1], &row[2], &row[3]]);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let bytes = std::fs::read(&cli.graph)
        .with_context(|| format!("reading graph document {}", cli.graph.display()))?;
    let graph = MemoryGraph::from_json_slice(&bytes)
        .with_context(|| format!("parsing graph document {}", cli.graph.display()))?;

    let mut options = ScanOptions {
        batch_size: cli.batch_size,
        ..ScanOptions::default()
    };
    if let Some(max_concurrency) = cli.max_concurrency {
        options.max_concurrency = max_concurrency;
    }
    options.unit_timeout = cli.unit_timeout_secs.map(Duration::from_secs);

    let rows = compute_schema(Arc::new(graph), &options)
        .await
        .context("computing schema")?;

    match cli.format {
        Format::Jsonl => print_jsonl(&rows)?,
        Format::Table => print_table(&rows),
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(e) = run(cli).await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
