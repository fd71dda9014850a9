//! Task registry
//!
//! Owns the task store handle, the running set and the update lock.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use contracts::{ContractError, Task, TaskId, TaskStore, TaskUpdate};
use tracing::{debug, instrument, warn};

use crate::config::RegistryConfig;
use crate::error::{RegistryError, Result};
use crate::lock::UpdateLock;

/// Registry of batch ingestion tasks
///
/// Generic over the store: `TaskStore` futures are `impl Future + Send`,
/// which is not object safe.
pub struct TaskRegistry<S> {
    store: Arc<S>,
    running: Mutex<HashSet<TaskId>>,
    update_lock: UpdateLock,
    config: RegistryConfig,
}

impl<S> TaskRegistry<S>
where
    S: TaskStore + Sync + 'static,
{
    pub fn new(store: S, config: RegistryConfig) -> Self {
        Self::from_shared(Arc::new(store), config)
    }

    /// Build over a store shared with other components
    pub fn from_shared(store: Arc<S>, config: RegistryConfig) -> Self {
        Self {
            store,
            running: Mutex::new(HashSet::new()),
            update_lock: UpdateLock::new(config.update_lock_shards),
            config,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Number of update lock shards in use
    pub fn lock_shards(&self) -> usize {
        self.update_lock.shard_count()
    }

    /// Persist a new task record and return its assigned id
    #[instrument(name = "registry_create_task", skip(self, task), fields(output_index = %task.output_index))]
    pub async fn create_task(&self, task: Task) -> std::result::Result<TaskId, ContractError> {
        let task_id = self.store.create_task(task).await?;
        observability::record_task_created();
        debug!(task_id = %task_id, "Task record created");
        Ok(task_id)
    }

    pub async fn get_task(&self, task_id: &TaskId) -> std::result::Result<Option<Task>, ContractError> {
        self.store.get_task(task_id).await
    }

    /// Add a task id to the running set
    pub fn register_running(&self, task_id: &TaskId) -> Result<()> {
        let mut running = self.lock_running();
        if running.contains(task_id) {
            return Err(RegistryError::Duplicate {
                task_id: task_id.to_string(),
            });
        }
        if running.len() >= self.config.max_running_tasks {
            return Err(RegistryError::CapacityExceeded {
                limit: self.config.max_running_tasks,
            });
        }
        running.insert(task_id.clone());
        observability::record_running_tasks(running.len());
        debug!(task_id = %task_id, running = running.len(), "Task registered as running");
        Ok(())
    }

    /// Remove a task id from the running set, returning whether it was present
    pub fn deregister(&self, task_id: &TaskId) -> bool {
        let mut running = self.lock_running();
        let removed = running.remove(task_id);
        if removed {
            observability::record_running_tasks(running.len());
        }
        removed
    }

    pub fn is_running(&self, task_id: &TaskId) -> bool {
        self.lock_running().contains(task_id)
    }

    pub fn running_count(&self) -> usize {
        self.lock_running().len()
    }

    /// Apply `update` to the task record under the update lock
    ///
    /// Waits at most `timeout` for the lock. With `wait_for_completion` the
    /// store write is awaited; otherwise it runs on a spawned task that keeps
    /// the permit until the write finishes, so later updates still queue
    /// behind it. A terminal update also leaves the running set.
    #[instrument(
        name = "registry_update_task",
        skip(self, update),
        fields(task_id = %task_id, state = ?update.state)
    )]
    pub async fn update_task(
        &self,
        task_id: &TaskId,
        update: TaskUpdate,
        timeout: Duration,
        wait_for_completion: bool,
    ) -> Result<()> {
        let started = Instant::now();
        let permit = self.update_lock.acquire(task_id, timeout).await?;
        observability::record_update_lock_wait_ms(started.elapsed().as_secs_f64() * 1000.0);

        let terminal = update.is_terminal();
        let store = Arc::clone(&self.store);
        let id = task_id.clone();
        let write = async move {
            let result = store.update_task(&id, &update).await;
            drop(permit);
            result
        };

        if wait_for_completion {
            write.await?;
        } else {
            let id = task_id.clone();
            tokio::spawn(async move {
                if let Err(e) = write.await {
                    warn!(task_id = %id, error = %e, "Background task update failed");
                    observability::record_task_update_failure("store");
                }
            });
        }

        if terminal {
            self.deregister(task_id);
        }
        Ok(())
    }

    fn lock_running(&self) -> MutexGuard<'_, HashSet<TaskId>> {
        self.running.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S> std::fmt::Debug for TaskRegistry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskRegistry")
            .field("config", &self.config)
            .field("lock_shards", &self.update_lock.shard_count())
            .finish_non_exhaustive()
    }
}
