//! Layered error definitions
//!
//! Categorized by source: input / store / executor / validation

use std::fmt;

use thiserror::Error;

use crate::SourceKind;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Input Errors =====
    /// Descriptor parse error
    #[error("input parse error: {message}")]
    InputParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ===== Task Store Errors =====
    /// Backing store failure, surfaced to callers verbatim
    #[error("{message}")]
    Store { message: String },

    /// Task record not found
    #[error("task not found: {task_id}")]
    TaskNotFound { task_id: String },

    // ===== Executor Errors =====
    /// Ingestion engine could not be launched, surfaced to callers verbatim
    #[error("{message}")]
    Executor { message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create descriptor parse error
    pub fn input_parse(message: impl Into<String>) -> Self {
        Self::InputParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create task store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create task-not-found error
    pub fn task_not_found(task_id: impl Into<String>) -> Self {
        Self::TaskNotFound {
            task_id: task_id.into(),
        }
    }

    /// Create executor launch error
    pub fn executor(message: impl Into<String>) -> Self {
        Self::Executor {
            message: message.into(),
        }
    }
}

/// Class of a validation failure, rendered as the prefix of the caller-visible message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The descriptor is malformed or incomplete
    IllegalArgument,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllegalArgument => f.write_str("IllegalArgumentException"),
        }
    }
}

/// Batch ingestion descriptor rejected before any task exists
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("The batch ingest input data source cannot be null")]
    MissingDataSource,

    #[error("The batch ingest input data source is missing data type or source")]
    MissingSourceType,

    #[error("The batch ingest input data source type '{0}' is not supported")]
    UnsupportedSourceType(String),

    #[error("The batch ingest input data source '{key}' must be a list of strings")]
    MalformedSourceList { key: String },

    #[error("The batch ingest input {} is empty", .kind.list_label())]
    EmptySourceList { kind: SourceKind },

    /// Every offending entry, in input order
    #[error(
        "The following batch ingest input {} are invalid: [{}]",
        .kind.entry_label(),
        .entries.join(", ")
    )]
    InvalidSourceEntries {
        kind: SourceKind,
        entries: Vec<String>,
    },

    #[error("The batch ingest input index name cannot be empty")]
    EmptyIndexName,
}

impl ValidationError {
    pub fn kind(&self) -> ValidationErrorKind {
        ValidationErrorKind::IllegalArgument
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_entries_listed_in_order() {
        let err = ValidationError::InvalidSourceEntries {
            kind: SourceKind::S3,
            entries: vec!["b".into(), "a".into()],
        };
        assert_eq!(
            err.to_string(),
            "The following batch ingest input S3 URIs are invalid: [b, a]"
        );
    }

    #[test]
    fn test_kind_renders_as_exception_name() {
        assert_eq!(
            ValidationError::MissingDataSource.kind().to_string(),
            "IllegalArgumentException"
        );
    }

    #[test]
    fn test_empty_list_label_per_kind() {
        let s3 = ValidationError::EmptySourceList {
            kind: SourceKind::S3,
        };
        let openai = ValidationError::EmptySourceList {
            kind: SourceKind::OpenAi,
        };
        assert_eq!(s3.to_string(), "The batch ingest input s3Uris is empty");
        assert_eq!(
            openai.to_string(),
            "The batch ingest input openAI file ids is empty"
        );
    }

    #[test]
    fn test_store_error_message_is_verbatim() {
        let err = ContractError::store("Failed to create task");
        assert_eq!(err.to_string(), "Failed to create task");
    }
}
