//! `run` command implementation.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use contracts::BatchIngestionInput;
use ingestion::{MockReaderConfig, MockReaderFactory, PipelineExecutor};
use input_loader::InputLoader;
use orchestrator::{BatchIngestionOrchestrator, OrchestratorConfig};
use task_registry::{InMemoryTaskStore, RegistryConfig, TaskRegistry};
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::error::CliError;
use crate::report::{RunStats, TaskReport};

type Orchestrator = BatchIngestionOrchestrator<InMemoryTaskStore, PipelineExecutor<MockReaderFactory>>;

/// Execute the `run` command
pub async fn run_batch(args: &RunArgs) -> Result<()> {
    if args.metrics_port != 0 {
        observability::install_metrics_exporter(args.metrics_port)?;
    }

    let inputs = load_inputs(&args.input)?;
    let orchestrator = build_orchestrator(args);

    info!(
        tasks = inputs.len(),
        max_running = args.max_running,
        lock_timeout_ms = args.lock_timeout_ms,
        detach = args.detach,
        "Starting batch ingestion"
    );

    let started = Instant::now();
    let mut tasks = JoinSet::new();
    for (path, input) in inputs {
        let orchestrator = orchestrator.clone();
        let detach = args.detach;
        tasks.spawn(async move { run_one(orchestrator, path, input, detach).await });
    }

    let mut stats = RunStats::default();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            joined = tasks.join_next() => match joined {
                Some(Ok(report)) => stats.record(report),
                Some(Err(e)) => warn!(error = %e, "Batch ingestion task did not finish"),
                None => break,
            },
            _ = &mut shutdown => {
                warn!(pending = tasks.len(), "Received shutdown signal, aborting batch ingestion");
                tasks.abort_all();
                break;
            }
        }
    }

    stats.duration = started.elapsed();
    stats.print_summary();

    info!(
        total = stats.total(),
        failed = stats.failed(),
        duration_secs = stats.duration.as_secs_f64(),
        "Batch ingestion finished"
    );

    match stats.failed() {
        0 => Ok(()),
        failed => Err(CliError::TasksFailed {
            failed,
            total: stats.total(),
        }
        .into()),
    }
}

fn build_orchestrator(args: &RunArgs) -> Orchestrator {
    let registry = TaskRegistry::new(
        InMemoryTaskStore::new(),
        RegistryConfig {
            max_running_tasks: args.max_running,
            update_lock_timeout_ms: args.lock_timeout_ms,
            update_lock_shards: args.lock_shards,
        },
    );
    let factory = MockReaderFactory::new(MockReaderConfig {
        records_per_entry: args.records_per_source,
        fail_every: args.fail_every,
        record_delay: Duration::from_millis(args.record_delay_ms),
        launch_error: None,
    });

    BatchIngestionOrchestrator::new(
        Arc::new(registry),
        Arc::new(PipelineExecutor::new("mock", factory)),
        OrchestratorConfig {
            wait_for_completion: true,
        },
    )
}

fn load_inputs(paths: &[PathBuf]) -> Result<Vec<(PathBuf, BatchIngestionInput)>> {
    paths
        .iter()
        .map(|path| {
            if !path.exists() {
                return Err(CliError::input_not_found(path.display().to_string()).into());
            }
            let input = InputLoader::load_from_path(path)
                .with_context(|| format!("Failed to load input from {}", path.display()))?;
            Ok((path.clone(), input))
        })
        .collect()
}

async fn run_one(
    orchestrator: Orchestrator,
    path: PathBuf,
    input: BatchIngestionInput,
    detach: bool,
) -> TaskReport {
    let result = if detach {
        match orchestrator.submit(&input).await {
            Ok(submitted) => {
                log_submitted(&path, &submitted.task_id, submitted.state);
                match submitted.handle.await {
                    Ok(result) => result,
                    Err(e) => return TaskReport::aborted(path, e.to_string()),
                }
            }
            Err(e) => Err(e),
        }
    } else {
        orchestrator.execute(&input).await
    };

    let record_error = match &result {
        Ok(response) => orchestrator
            .registry()
            .get_task(&response.task_id)
            .await
            .ok()
            .flatten()
            .and_then(|task| task.error),
        Err(_) => None,
    };

    TaskReport::new(path, result, record_error)
}

fn log_submitted(path: &Path, task_id: &contracts::TaskId, state: contracts::TaskState) {
    info!(input = %path.display(), task_id = %task_id, state = %state, "Task submitted");
}

/// Wait for Ctrl+C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}
