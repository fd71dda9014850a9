//! Response types

use contracts::{TaskId, TaskState, TaskType};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use crate::error::IngestError;

/// Final answer to a batch ingestion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchIngestionResponse {
    pub task_id: TaskId,
    pub task_type: TaskType,
    /// `COMPLETED` or `FAILED`
    pub state: TaskState,
    /// Percentage of records ingested, in `[0, 100]`
    pub success_rate: f64,
}

/// Handle to a request whose ingestion runs in the background
#[derive(Debug)]
pub struct SubmittedTask {
    pub task_id: TaskId,
    /// Always `RUNNING` at submission time
    pub state: TaskState,
    /// Resolves to the final response once ingestion ends
    pub handle: JoinHandle<Result<BatchIngestionResponse, IngestError>>,
}
