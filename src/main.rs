//! cronkit: describe a cron expression and list its occurrences.
//!
//! Options not given on the command line fall back to `cronkit.toml` (or the
//! file named by `--config`) and `CRONKIT_*` environment variables. Set
//! `RUST_LOG=debug` to trace compilation and search.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;
use tracing::debug;

use cronkit::{CronError, Expression, Result, ScheduleOptions};

// ── CLI ─────────────────────────────────────────────────────────────

/// Compile a cron expression, describe it and list upcoming occurrences.
#[derive(Parser, Debug)]
#[command(name = "cronkit", version, about)]
struct Cli {
    /// Cron expression (5 to 7 fields) or a preset such as @daily.
    expression: String,

    /// Reference instant in epoch seconds (default: now).
    #[arg(long)]
    from: Option<i64>,

    /// Number of occurrences to list.
    #[arg(long, default_value_t = 5)]
    count: usize,

    /// List occurrences before the reference instant instead of after it.
    #[arg(long)]
    previous: bool,

    /// IANA time zone, e.g. Europe/Stockholm.
    #[arg(long, conflicts_with = "utc_offset")]
    time_zone: Option<String>,

    /// Fixed offset from UTC in minutes.
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: Option<i32>,

    /// Options file (default: cronkit.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print a JSON report instead of text.
    #[arg(long)]
    json: bool,

    /// Include the compiled pattern tree.
    #[arg(long)]
    tree: bool,
}

// ── Report ──────────────────────────────────────────────────────────

#[derive(Serialize, Debug)]
struct Report {
    expression: String,
    description: String,
    canonical: String,
    quartz: String,
    time_zone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tree: Option<String>,
    occurrences: Vec<Occurrence>,
}

#[derive(Serialize, Debug)]
struct Occurrence {
    epoch: i64,
    utc: String,
}

impl Occurrence {
    fn new(epoch: i64) -> Self {
        let utc = DateTime::<Utc>::from_timestamp(epoch, 0)
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_default();
        Self { epoch, utc }
    }
}

// ── main ────────────────────────────────────────────────────────────

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(if e.is_construction() { 2 } else { 1 });
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut flags = ScheduleOptions::new();
    flags.time_zone = cli.time_zone.clone();
    flags.utc_offset = cli.utc_offset;
    let options = flags.or(ScheduleOptions::load(cli.config.as_deref())?);
    debug!(?options, "effective options");

    let expression = Expression::with_options(&cli.expression, &options)?;
    let occurrences = collect(&expression, cli.from, cli.count, cli.previous);

    let report = Report {
        expression: expression.expression().to_string(),
        description: expression.describe(),
        canonical: expression.as_string(),
        quartz: expression.as_quartz_string(),
        time_zone: expression.time_zone(),
        tree: cli.tree.then(|| expression.dump_tree()),
        occurrences: occurrences.into_iter().map(Occurrence::new).collect(),
    };

    if cli.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| CronError::Config(e.to_string()))?;
        println!("{json}");
        return Ok(());
    }

    println!("{}", report.description);
    println!("canonical: {}", report.canonical);
    println!("quartz:    {}", report.quartz);
    println!("zone:      {}", report.time_zone);
    if let Some(tree) = &report.tree {
        println!("{tree}");
    }
    if report.occurrences.is_empty() {
        println!("no occurrences within the search horizon");
    }
    for occurrence in &report.occurrences {
        println!("{}  {}", occurrence.epoch, occurrence.utc);
    }
    Ok(())
}

fn collect(expression: &Expression, from: Option<i64>, count: usize, previous: bool) -> Vec<i64> {
    if !previous {
        return expression.occurrences(from).take(count).collect();
    }
    let mut found = Vec::with_capacity(count);
    let mut cursor = from;
    while found.len() < count {
        match expression.previous(cursor) {
            Some(epoch) => {
                found.push(epoch);
                cursor = Some(epoch);
            }
            None => break,
        }
    }
    found
}
