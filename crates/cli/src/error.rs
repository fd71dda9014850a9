//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Descriptor file not found
    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    /// Descriptor rejected by validation
    #[error("Input validation failed: {path}")]
    InvalidInput { path: String },

    /// At least one task did not complete
    #[error("{failed} of {total} batch ingestion tasks did not complete")]
    TasksFailed { failed: u64, total: u64 },
}

impl CliError {
    pub fn input_not_found(path: impl Into<String>) -> Self {
        Self::InputNotFound { path: path.into() }
    }

    pub fn invalid_input(path: impl Into<String>) -> Self {
        Self::InvalidInput { path: path.into() }
    }
}
