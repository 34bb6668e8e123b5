use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use scoutbook::constants::rank::DEFAULT_TOP_N;
use scoutbook::pipeline;
use scoutbook::{MetricRegistry, MetricSpec, PipelineError, Schema, WorkspaceLayout};

#[derive(Debug, Parser)]
#[command(
    name = "scoutbook",
    disable_help_subcommand = true,
    about = "Batch cleaning, aggregation, and ranking pipeline for match scouting data",
    long_about = "Validate raw scouting records against a schema, group them by team, \
compute per-team statistics, and rank teams by configured metrics. Stages read and \
write JSON artifacts under the workspace's data/ and outputs/ folders."
)]
struct Cli {
    /// Workspace root holding `data/` and `outputs/`.
    #[arg(long, default_value = ".", value_name = "DIR")]
    workspace: PathBuf,
    /// JSON schema descriptor; the stock match schema is used when omitted.
    #[arg(long, value_name = "PATH")]
    schema: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Ensure the workspace folders exist and clear stale artifacts.
    Clear,
    /// Validate and repair the raw snapshot; writes cleaned records and the
    /// scouter leaderboard.
    Clean,
    /// Group cleaned records by team.
    Group,
    /// Compute per-team statistics.
    Stats,
    /// Rank teams per configured metric.
    Rank {
        /// Statistics columns to rank on (descending), besides the built-in
        /// consistency metric. Repeat as needed.
        #[arg(long = "metric-column", value_name = "COLUMN")]
        columns: Vec<String>,
        /// Teams per chart hand-off slice.
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top_n: usize,
    },
    /// Reset the workspace and run every stage in order.
    All {
        /// Statistics columns to rank on (descending), besides the built-in
        /// consistency metric. Repeat as needed.
        #[arg(long = "metric-column", value_name = "COLUMN")]
        columns: Vec<String>,
        /// Teams per chart hand-off slice.
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top_n: usize,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), PipelineError> {
    let layout = WorkspaceLayout::new(&cli.workspace);
    let schema = load_schema(cli.schema.as_deref())?;
    match cli.command {
        Command::Clear => layout.reset(),
        Command::Clean => pipeline::run_clean(&layout, &schema).map(drop),
        Command::Group => pipeline::run_group(&layout).map(drop),
        Command::Stats => pipeline::run_stats(&layout).map(drop),
        Command::Rank { columns, top_n } => {
            pipeline::run_rank(&layout, &registry(&columns), top_n).map(drop)
        }
        Command::All { columns, top_n } => {
            pipeline::run_all(&layout, &schema, &registry(&columns), top_n)
        }
    }
}

fn registry(columns: &[String]) -> MetricRegistry {
    let mut registry = MetricRegistry::new();
    registry.register(MetricSpec::consistency());
    for column in columns {
        registry.register(MetricSpec::column(column.clone(), false));
    }
    registry
}

fn load_schema(path: Option<&Path>) -> Result<Schema, PipelineError> {
    match path {
        Some(path) => Schema::from_json(&scoutbook::store::read_json(path)?),
        None => Ok(Schema::default_match_schema()),
    }
}
