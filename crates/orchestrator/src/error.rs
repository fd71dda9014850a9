//! Orchestrator error types

use contracts::{ContractError, TaskId, ValidationError};
use task_registry::RegistryError;
use thiserror::Error;

/// Who is at fault for a failed request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Bad descriptor (4xx-equivalent)
    ClientInput,
    /// Task bookkeeping or engine failure (5xx-equivalent)
    Internal,
}

impl ErrorClass {
    /// HTTP-equivalent status code
    pub fn status_code(self) -> u16 {
        match self {
            Self::ClientInput => 400,
            Self::Internal => 500,
        }
    }
}

/// Call-level failure of a batch ingestion request
///
/// Partial ingestion failures are not errors; they end as a `Failed` task.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Descriptor rejected; no task was created
    #[error("{} in the batch ingestion input: {}", .0.kind(), .0)]
    Validation(#[from] ValidationError),

    /// Store could not create the task record
    #[error("{0}")]
    TaskCreation(#[source] ContractError),

    /// Task could not join the running set; its record is marked failed
    #[error("{source}")]
    Registration {
        task_id: TaskId,
        #[source]
        source: RegistryError,
    },

    /// Executor could not start; the record is marked failed
    #[error("{source}")]
    ExecutorLaunch {
        task_id: TaskId,
        #[source]
        source: ContractError,
    },
}

impl IngestError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Validation(_) => ErrorClass::ClientInput,
            Self::TaskCreation(_) | Self::Registration { .. } | Self::ExecutorLaunch { .. } => {
                ErrorClass::Internal
            }
        }
    }

    /// Id of the task record the failure was written to, if one exists
    pub fn task_id(&self) -> Option<&TaskId> {
        match self {
            Self::Registration { task_id, .. } | Self::ExecutorLaunch { task_id, .. } => {
                Some(task_id)
            }
            Self::Validation(_) | Self::TaskCreation(_) => None,
        }
    }
}

/// Orchestrator Result type alias
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_prefix() {
        let err = IngestError::from(ValidationError::MissingDataSource);
        assert_eq!(
            err.to_string(),
            format!("IllegalArgumentException in the batch ingestion input: {}", ValidationError::MissingDataSource)
        );
        assert_eq!(err.class(), ErrorClass::ClientInput);
        assert_eq!(err.class().status_code(), 400);
        assert!(err.task_id().is_none());
    }

    #[test]
    fn test_internal_messages_unmodified() {
        let err = IngestError::TaskCreation(ContractError::store("some error"));
        assert_eq!(err.to_string(), "some error");
        assert_eq!(err.class(), ErrorClass::Internal);

        let err = IngestError::ExecutorLaunch {
            task_id: TaskId::from("t1"),
            source: ContractError::executor("engine down"),
        };
        assert_eq!(err.to_string(), "engine down");
        assert_eq!(err.task_id(), Some(&TaskId::from("t1")));
    }
}
