//! Bounded-wait update lock
//!
//! One single-permit semaphore per shard. A task id always hashes to the same
//! shard, so updates of one task are totally ordered (tokio semaphores are FIFO).

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;

use contracts::TaskId;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::error::RegistryError;

pub(crate) struct UpdateLock {
    shards: Vec<Arc<Semaphore>>,
}

impl UpdateLock {
    pub(crate) fn new(shards: usize) -> Self {
        let shards = (0..shards.max(1))
            .map(|_| Arc::new(Semaphore::new(1)))
            .collect();
        Self { shards }
    }

    pub(crate) fn shard_count(&self) -> usize {
        self.shards.len()
    }

    pub(crate) fn shard_for(&self, task_id: &TaskId) -> usize {
        if self.shards.len() == 1 {
            return 0;
        }
        let mut hasher = DefaultHasher::new();
        task_id.hash(&mut hasher);
        (hasher.finish() % self.shards.len() as u64) as usize
    }

    /// Acquire the shard of `task_id`, giving up after `timeout`
    pub(crate) async fn acquire(
        &self,
        task_id: &TaskId,
        timeout: Duration,
    ) -> Result<OwnedSemaphorePermit, RegistryError> {
        let shard = Arc::clone(&self.shards[self.shard_for(task_id)]);
        match tokio::time::timeout(timeout, shard.acquire_owned()).await {
            Ok(Ok(permit)) => Ok(permit),
            Ok(Err(_)) => Err(RegistryError::LockClosed),
            Err(_) => Err(RegistryError::LockTimeout {
                task_id: task_id.to_string(),
                waited_ms: timeout.as_millis() as u64,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_shards_means_one() {
        assert_eq!(UpdateLock::new(0).shard_count(), 1);
    }

    #[test]
    fn test_same_task_same_shard() {
        let lock = UpdateLock::new(8);
        let id = TaskId::from("task-42");
        let shard = lock.shard_for(&id);
        assert!(shard < 8);
        assert_eq!(lock.shard_for(&id.clone()), shard);
    }

    #[tokio::test]
    async fn test_acquire_times_out_while_held() {
        let lock = UpdateLock::new(1);
        let id = TaskId::from("a");
        let _held = lock.acquire(&id, Duration::from_millis(50)).await.unwrap();

        let err = lock
            .acquire(&TaskId::from("b"), Duration::from_millis(20))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::LockTimeout { waited_ms: 20, .. }));
    }

    #[tokio::test]
    async fn test_released_permit_can_be_reacquired() {
        let lock = UpdateLock::new(1);
        let id = TaskId::from("a");
        drop(lock.acquire(&id, Duration::from_millis(50)).await.unwrap());
        assert!(lock.acquire(&id, Duration::from_millis(50)).await.is_ok());
    }
}
