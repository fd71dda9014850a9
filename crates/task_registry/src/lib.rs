//! # Task Registry
//!
//! Bookkeeping of batch ingestion tasks.
//!
//! Responsibilities:
//! - Create task records through a `TaskStore`
//! - Track running task ids (duplicate detection, capacity bound)
//! - Serialize task record updates behind a bounded-wait lock
//!
//! ## Usage Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use task_registry::{InMemoryTaskStore, RegistryConfig, TaskRegistry};
//!
//! let registry = Arc::new(TaskRegistry::new(InMemoryTaskStore::new(), RegistryConfig::default()));
//!
//! let task_id = registry.create_task(Task::batch_ingest("my-index")).await?;
//! registry.register_running(&task_id)?;
//! registry
//!     .update_task(&task_id, TaskUpdate::completed(), registry.config().update_lock_timeout(), true)
//!     .await?;
//! ```

mod config;
mod error;
mod lock;
mod memory;
mod registry;

pub use config::{RegistryConfig, DEFAULT_MAX_RUNNING_TASKS, DEFAULT_UPDATE_LOCK_TIMEOUT_MS};
pub use error::{RegistryError, Result};
pub use memory::InMemoryTaskStore;
pub use registry::TaskRegistry;
