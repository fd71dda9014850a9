//! # Orchestrator
//!
//! Drives one batch ingestion request end to end:
//! validate → create task → register running → ingest → evaluate → update.
//!
//! ## Usage Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use orchestrator::{BatchIngestionOrchestrator, OrchestratorConfig};
//! use task_registry::{InMemoryTaskStore, RegistryConfig, TaskRegistry};
//!
//! let registry = Arc::new(TaskRegistry::new(InMemoryTaskStore::new(), RegistryConfig::default()));
//! let orchestrator = BatchIngestionOrchestrator::new(registry, Arc::new(executor), OrchestratorConfig::default());
//!
//! let response = orchestrator.execute(&input).await?;
//! println!("{} -> {}", response.task_id, response.state);
//! ```

mod config;
mod error;
pub mod evaluator;
mod orchestrator;
mod response;

pub use config::OrchestratorConfig;
pub use error::{ErrorClass, IngestError, Result};
pub use evaluator::{evaluate, Evaluation};
pub use orchestrator::BatchIngestionOrchestrator;
pub use response::{BatchIngestionResponse, SubmittedTask};
