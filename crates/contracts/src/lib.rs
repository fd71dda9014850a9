//! # Contracts
//!
//! Frozen interface contracts shared by every crate in the workspace: the task
//! record, the batch ingestion descriptor, the validated data source union and
//! the traits behind which the task store and the ingestion engines live.
//! All business crates depend on this crate only, reverse dependencies are prohibited.
//!
//! ## Task Model
//! - A `Task` gets its `TaskId` from the store, never from the caller
//! - State moves `CREATED -> RUNNING -> COMPLETED | FAILED`
//! - `error` is only populated on `FAILED`

mod batch_input;
mod data_source;
mod error;
mod executor;
mod request;
mod store;
mod task;

pub use batch_input::*;
pub use data_source::{DataSource, SourceKind};
pub use error::*;
pub use executor::{IngestionExecutor, IngestionOutcome, LocalIngestionExecutor};
pub use request::IngestionRequest;
pub use store::{LocalTaskStore, TaskStore};
pub use task::*;
