//! TaskStore trait - task persistence contract
//!
//! Only the contract lives here; the registry crate ships an in-memory store.

use crate::{ContractError, Task, TaskId, TaskUpdate};

/// Backing store of task records
#[trait_variant::make(TaskStore: Send)]
pub trait LocalTaskStore {
    /// Persist a new record and return the id it was assigned
    ///
    /// # Errors
    /// Store failures are returned as-is; no record exists afterwards.
    async fn create_task(&self, task: Task) -> Result<TaskId, ContractError>;

    /// Read a record back
    async fn get_task(&self, task_id: &TaskId) -> Result<Option<Task>, ContractError>;

    /// Apply `update` to an existing record
    async fn update_task(&self, task_id: &TaskId, update: &TaskUpdate)
        -> Result<(), ContractError>;
}
