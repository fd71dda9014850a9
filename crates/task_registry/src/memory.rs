//! In-memory task store

use std::collections::HashMap;

use contracts::{ContractError, Task, TaskId, TaskStore, TaskUpdate};
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Task store backed by a process-local map
///
/// Ids are UUID v4 strings.
#[derive(Debug, Default)]
pub struct InMemoryTaskStore {
    tasks: RwLock<HashMap<TaskId, Task>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }

    /// Copy of every stored record
    pub async fn snapshot(&self) -> Vec<Task> {
        self.tasks.read().await.values().cloned().collect()
    }
}

impl TaskStore for InMemoryTaskStore {
    #[instrument(name = "memory_store_create", skip(self, task))]
    async fn create_task(&self, task: Task) -> Result<TaskId, ContractError> {
        let task_id = TaskId::new(Uuid::new_v4().to_string());
        let record = task.with_id(task_id.clone());
        self.tasks.write().await.insert(task_id.clone(), record);
        debug!(task_id = %task_id, "task stored");
        Ok(task_id)
    }

    async fn get_task(&self, task_id: &TaskId) -> Result<Option<Task>, ContractError> {
        Ok(self.tasks.read().await.get(task_id).cloned())
    }

    #[instrument(name = "memory_store_update", skip(self, update), fields(task_id = %task_id))]
    async fn update_task(&self, task_id: &TaskId, update: &TaskUpdate) -> Result<(), ContractError> {
        let mut tasks = self.tasks.write().await;
        let task = tasks
            .get_mut(task_id)
            .ok_or_else(|| ContractError::task_not_found(task_id.as_str()))?;
        task.apply(update);
        Ok(())
    }
}
