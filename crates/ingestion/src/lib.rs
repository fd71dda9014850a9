//! # Ingestion Pipeline
//!
//! Record ingestion for validated batch ingestion requests.
//!
//! Responsibilities:
//! - Open one `RecordSource` per data source entry (via a `ReaderFactory`)
//! - Collect per-record results over async-channel
//! - Tally attempted / succeeded records into an `IngestionOutcome`
//!
//! ## Usage Example
//!
//! ```ignore
//! use ingestion::{MockReaderFactory, PipelineExecutor};
//! use contracts::IngestionExecutor;
//!
//! let executor = PipelineExecutor::new("mock", MockReaderFactory::with_records(10, 2));
//! let outcome = executor.ingest(&request).await?;
//! assert_eq!(outcome.success_rate(), 50.0);
//! ```
//!
//! ## Driving the pipeline directly
//!
//! ```ignore
//! use ingestion::{IngestionPipeline, MockRecordSource};
//!
//! let mut pipeline = IngestionPipeline::new(100);
//! pipeline.register_source(Box::new(MockRecordSource::new(SourceKind::S3, "s3://b/k", config)));
//! let outcome = pipeline.run().await?;
//! ```

mod config;
mod error;
mod executor;
mod mock;
mod pipeline;
mod record;
mod source;

// Re-exports
pub use config::{IngestionMetrics, MetricsSnapshot, PipelineConfig};
pub use error::{IngestionError, Result};
pub use executor::{PipelineExecutor, ReaderFactory};
pub use mock::{MockReaderConfig, MockReaderFactory, MockRecordSource};
pub use pipeline::IngestionPipeline;
pub use record::{RecordResult, RecordStatus};
pub use source::RecordSource;
