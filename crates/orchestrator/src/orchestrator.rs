//! Batch ingestion orchestrator
//!
//! State flow of one request:
//!
//! ```text
//! Validating ──► TaskCreated ──► Running ──► Completed | Failed
//!     │               │             │
//!     └► Validation   └► TaskCreation / Registration (record FAILED)
//! ```

use std::sync::Arc;

use contracts::{
    BatchIngestionInput, IngestionExecutor, IngestionRequest, Task, TaskId, TaskState, TaskStore,
    TaskType, TaskUpdate,
};
use task_registry::TaskRegistry;
use tracing::{debug, error, info, instrument, warn};

use crate::config::OrchestratorConfig;
use crate::error::{IngestError, Result};
use crate::evaluator::{self, Evaluation};
use crate::response::{BatchIngestionResponse, SubmittedTask};

/// Batch ingestion orchestrator
///
/// Cheap to clone; clones share the registry and the executor.
pub struct BatchIngestionOrchestrator<S, E> {
    registry: Arc<TaskRegistry<S>>,
    executor: Arc<E>,
    config: OrchestratorConfig,
}

impl<S, E> Clone for BatchIngestionOrchestrator<S, E> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            executor: Arc::clone(&self.executor),
            config: self.config.clone(),
        }
    }
}

impl<S, E> BatchIngestionOrchestrator<S, E>
where
    S: TaskStore + Sync + 'static,
    E: IngestionExecutor + Sync + 'static,
{
    pub fn new(registry: Arc<TaskRegistry<S>>, executor: Arc<E>, config: OrchestratorConfig) -> Self {
        Self {
            registry,
            executor,
            config,
        }
    }

    pub fn registry(&self) -> &Arc<TaskRegistry<S>> {
        &self.registry
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Run a request to its terminal state
    ///
    /// Returns the response for both `COMPLETED` and `FAILED` outcomes;
    /// `Err` only when the request could not be driven at all.
    #[instrument(
        name = "orchestrator_execute",
        skip(self, input),
        fields(index = %input.index_name, executor = %self.executor.name())
    )]
    pub async fn execute(&self, input: &BatchIngestionInput) -> Result<BatchIngestionResponse> {
        let (task_id, request) = self.prepare(input).await?;
        self.drive(task_id, request).await
    }

    /// Register the task and ingest on a background task
    ///
    /// Returns once the task is `RUNNING`; the handle yields what
    /// [`execute`](Self::execute) would have returned.
    #[instrument(
        name = "orchestrator_submit",
        skip(self, input),
        fields(index = %input.index_name, executor = %self.executor.name())
    )]
    pub async fn submit(&self, input: &BatchIngestionInput) -> Result<SubmittedTask> {
        let (task_id, request) = self.prepare(input).await?;

        let this = self.clone();
        let id = task_id.clone();
        let handle = tokio::spawn(async move { this.drive(id, request).await });

        Ok(SubmittedTask {
            task_id,
            state: TaskState::Running,
            handle,
        })
    }

    /// Map a success rate to the terminal state and persist it
    ///
    /// The record update is best effort: a failure is logged and counted
    /// but the evaluation is still returned. The running slot is released.
    pub async fn handle_success_rate(&self, rate: f64, task_id: &TaskId) -> Evaluation {
        let evaluation = evaluator::evaluate(rate);
        observability::record_success_rate(evaluator::normalize(rate));
        observability::record_task_terminal(evaluation.state);

        match evaluation.state {
            TaskState::Completed => info!(task_id = %task_id, rate, "Batch ingestion completed"),
            _ => warn!(
                task_id = %task_id,
                rate,
                error = evaluation.error.as_deref().unwrap_or_default(),
                "Batch ingestion failed"
            ),
        }

        self.update_task(task_id, evaluation.to_update()).await;
        self.registry.deregister(task_id);
        evaluation
    }

    /// Validating → TaskCreated → Running
    async fn prepare(&self, input: &BatchIngestionInput) -> Result<(TaskId, IngestionRequest)> {
        let request = input_loader::validate(input).map_err(|e| {
            observability::record_validation_failure();
            let e = IngestError::from(e);
            warn!(error = %e, "Rejected batch ingestion input");
            e
        })?;

        let task_id = self
            .registry
            .create_task(Task::batch_ingest(request.index_name.as_str()))
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to create batch ingestion task");
                IngestError::TaskCreation(e)
            })?;

        if let Err(e) = self.registry.register_running(&task_id) {
            error!(task_id = %task_id, error = %e, "Failed to register batch ingestion task");
            observability::record_task_terminal(TaskState::Failed);
            self.update_task(&task_id, TaskUpdate::failed(e.to_string())).await;
            return Err(IngestError::Registration { task_id, source: e });
        }

        self.update_task(&task_id, TaskUpdate::state(TaskState::Running)).await;
        debug!(task_id = %task_id, "Batch ingestion task running");
        Ok((task_id, request))
    }

    /// Running → Completed | Failed
    async fn drive(&self, task_id: TaskId, request: IngestionRequest) -> Result<BatchIngestionResponse> {
        let outcome = match self.executor.ingest(&request).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(task_id = %task_id, error = %e, "Failed to launch batch ingestion");
                observability::record_task_terminal(TaskState::Failed);
                self.update_task(&task_id, TaskUpdate::failed(e.to_string())).await;
                self.registry.deregister(&task_id);
                return Err(IngestError::ExecutorLaunch { task_id, source: e });
            }
        };

        let success_rate = evaluator::normalize(outcome.success_rate());
        debug!(
            task_id = %task_id,
            attempted = outcome.attempted,
            succeeded = outcome.succeeded,
            "Batch ingestion finished"
        );
        let evaluation = self.handle_success_rate(success_rate, &task_id).await;

        Ok(BatchIngestionResponse {
            task_id,
            task_type: TaskType::BatchIngest,
            state: evaluation.state,
            success_rate,
        })
    }

    /// Best-effort record update
    async fn update_task(&self, task_id: &TaskId, update: TaskUpdate) {
        if let Err(e) = self
            .registry
            .update_task(
                task_id,
                update,
                self.registry.config().update_lock_timeout(),
                self.config.wait_for_completion,
            )
            .await
        {
            warn!(task_id = %task_id, error = %e, "Failed to update batch ingestion task");
            observability::record_task_update_failure(e.reason());
        }
    }
}
