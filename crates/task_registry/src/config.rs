//! Registry configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default wait for the task update lock
pub const DEFAULT_UPDATE_LOCK_TIMEOUT_MS: u64 = 5000;

/// Default bound on concurrently running tasks
pub const DEFAULT_MAX_RUNNING_TASKS: usize = 100;

/// Registry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Maximum number of running tasks
    #[serde(default = "default_max_running_tasks")]
    pub max_running_tasks: usize,

    /// Update lock acquisition timeout in milliseconds
    #[serde(default = "default_update_lock_timeout_ms")]
    pub update_lock_timeout_ms: u64,

    /// Number of update lock shards (1 = one lock per registry)
    #[serde(default = "default_update_lock_shards")]
    pub update_lock_shards: usize,
}

fn default_max_running_tasks() -> usize {
    DEFAULT_MAX_RUNNING_TASKS
}

fn default_update_lock_timeout_ms() -> u64 {
    DEFAULT_UPDATE_LOCK_TIMEOUT_MS
}

fn default_update_lock_shards() -> usize {
    1
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_running_tasks: DEFAULT_MAX_RUNNING_TASKS,
            update_lock_timeout_ms: DEFAULT_UPDATE_LOCK_TIMEOUT_MS,
            update_lock_shards: 1,
        }
    }
}

impl RegistryConfig {
    /// Update lock acquisition timeout
    pub fn update_lock_timeout(&self) -> Duration {
        Duration::from_millis(self.update_lock_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::default();
        assert_eq!(config.max_running_tasks, 100);
        assert_eq!(config.update_lock_timeout(), Duration::from_secs(5));
        assert_eq!(config.update_lock_shards, 1);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: RegistryConfig = serde_json::from_str(r#"{"max_running_tasks": 2}"#).unwrap();
        assert_eq!(config.max_running_tasks, 2);
        assert_eq!(config.update_lock_timeout_ms, DEFAULT_UPDATE_LOCK_TIMEOUT_MS);
    }
}
