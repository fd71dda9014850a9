//! `IngestionExecutor` backed by the ingestion pipeline

use contracts::{ContractError, IngestionExecutor, IngestionOutcome, IngestionRequest};
use tracing::{debug, instrument};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::pipeline::IngestionPipeline;
use crate::source::RecordSource;

/// Opens record sources for a request
pub trait ReaderFactory: Send + Sync {
    /// One source per data source entry; an error aborts the launch
    fn create_sources(&self, request: &IngestionRequest) -> Result<Vec<Box<dyn RecordSource>>>;
}

/// Executor that runs a fresh pipeline per request
pub struct PipelineExecutor<F> {
    name: String,
    factory: F,
    config: PipelineConfig,
}

impl<F: ReaderFactory> PipelineExecutor<F> {
    pub fn new(name: impl Into<String>, factory: F) -> Self {
        Self::with_config(name, factory, PipelineConfig::default())
    }

    pub fn with_config(name: impl Into<String>, factory: F, config: PipelineConfig) -> Self {
        Self {
            name: name.into(),
            factory,
            config,
        }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }
}

impl<F: ReaderFactory> IngestionExecutor for PipelineExecutor<F> {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "pipeline_executor_ingest",
        skip(self, request),
        fields(executor = %self.name, index = %request.index_name, kind = %request.data_source.kind())
    )]
    async fn ingest(&self, request: &IngestionRequest) -> std::result::Result<IngestionOutcome, ContractError> {
        let sources = self.factory.create_sources(request)?;
        debug!(sources = sources.len(), "record sources opened");

        let mut pipeline = IngestionPipeline::with_config(self.config.clone());
        for source in sources {
            pipeline.register_source(source);
        }
        Ok(pipeline.run().await?)
    }
}
