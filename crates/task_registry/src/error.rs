//! Registry error types

use contracts::ContractError;
use thiserror::Error;

/// Registry-specific errors
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Task id is already in the running set
    #[error("batch ingestion task {task_id} is already running")]
    Duplicate { task_id: String },

    /// Running set is full
    #[error("exceeded maximum number of running batch ingestion tasks: {limit}")]
    CapacityExceeded { limit: usize },

    /// Update lock not acquired in time
    #[error("timed out after {waited_ms}ms waiting for the update lock of task {task_id}")]
    LockTimeout { task_id: String, waited_ms: u64 },

    /// Update lock was closed
    #[error("task update lock is closed")]
    LockClosed,

    /// Backing store error (from contract)
    #[error(transparent)]
    Store(#[from] ContractError),
}

impl RegistryError {
    /// Short label for metrics
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Duplicate { .. } => "duplicate",
            Self::CapacityExceeded { .. } => "capacity",
            Self::LockTimeout { .. } => "lock_timeout",
            Self::LockClosed => "lock_closed",
            Self::Store(_) => "store",
        }
    }
}

/// Registry Result type alias
pub type Result<T> = std::result::Result<T, RegistryError>;
