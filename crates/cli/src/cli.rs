//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Batch Ingest - validate and run batch ingestion tasks
#[derive(Parser, Debug)]
#[command(
    name = "batch-ingest",
    author,
    version,
    about = "Batch ingestion task orchestrator",
    long_about = "Validates batch ingestion descriptors, registers one task per descriptor,\n\
                  runs the ingestion and records each task's terminal state from its\n\
                  success rate."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "BATCH_INGEST_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "BATCH_INGEST_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run batch ingestion for one or more descriptors
    Run(RunArgs),

    /// Validate a descriptor without running it
    Validate(ValidateArgs),

    /// Display descriptor information
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Descriptor files (TOML or JSON); each becomes one task
    #[arg(short, long, required = true, num_args = 1.., env = "BATCH_INGEST_INPUT", value_delimiter = ',')]
    pub input: Vec<PathBuf>,

    /// Records read from every data source entry
    #[arg(long, default_value = "10", env = "BATCH_INGEST_RECORDS_PER_SOURCE")]
    pub records_per_source: u64,

    /// Reject every n-th record (0 = never)
    #[arg(long, default_value = "0", env = "BATCH_INGEST_FAIL_EVERY")]
    pub fail_every: u64,

    /// Delay between records in milliseconds
    #[arg(long, default_value = "0", env = "BATCH_INGEST_RECORD_DELAY_MS")]
    pub record_delay_ms: u64,

    /// Maximum number of concurrently running tasks
    #[arg(long, default_value = "100", env = "BATCH_INGEST_MAX_RUNNING")]
    pub max_running: usize,

    /// Task update lock timeout in milliseconds
    #[arg(long, default_value = "5000", env = "BATCH_INGEST_LOCK_TIMEOUT_MS")]
    pub lock_timeout_ms: u64,

    /// Number of task update lock shards
    #[arg(long, default_value = "1", env = "BATCH_INGEST_LOCK_SHARDS")]
    pub lock_shards: usize,

    /// Return as soon as tasks are running and report completion later
    #[arg(long)]
    pub detach: bool,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "BATCH_INGEST_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Descriptor file to validate
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Descriptor file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
