//! Ingestion Pipeline main entry

use std::sync::Arc;

use async_channel::{bounded, Receiver, Sender};
use contracts::IngestionOutcome;
use metrics::counter;
use tracing::{debug, info, instrument, trace};

use crate::config::{IngestionMetrics, PipelineConfig};
use crate::error::{IngestionError, Result};
use crate::record::RecordResult;
use crate::source::RecordSource;

/// Ingestion Pipeline
///
/// Runs the registered record sources and merges their results into one
/// stream. The stream ends once every source has released its sender.
pub struct IngestionPipeline {
    /// Registered sources
    sources: Vec<Box<dyn RecordSource>>,

    /// Shared metrics
    metrics: Arc<IngestionMetrics>,

    /// Result sender (cloned into every source)
    tx: Option<Sender<RecordResult>>,

    /// Result receiver
    rx: Option<Receiver<RecordResult>>,
}

impl IngestionPipeline {
    /// Create new Ingestion Pipeline
    ///
    /// # Arguments
    /// * `channel_capacity` - Channel capacity
    pub fn new(channel_capacity: usize) -> Self {
        Self::with_config(PipelineConfig::new(channel_capacity))
    }

    pub fn with_config(config: PipelineConfig) -> Self {
        let (tx, rx) = bounded(config.channel_capacity.max(1));

        Self {
            sources: Vec::new(),
            metrics: Arc::new(IngestionMetrics::new()),
            tx: Some(tx),
            rx: Some(rx),
        }
    }

    /// Register a record source
    pub fn register_source(&mut self, source: Box<dyn RecordSource>) {
        debug!(kind = %source.kind(), entry = %source.entry(), "registered record source");
        self.sources.push(source);
    }

    /// Start all registered sources
    #[instrument(name = "ingestion_start_all", skip(self))]
    pub fn start_all(&self) -> Result<()> {
        let tx = self.tx.as_ref().ok_or(IngestionError::ChannelClosed)?;
        info!(count = self.sources.len(), "starting all record sources");
        for source in &self.sources {
            if !source.is_running() {
                debug!(entry = %source.entry(), "starting source");
                source.start(tx.clone(), Arc::clone(&self.metrics));
            }
        }
        Ok(())
    }

    /// Stop all sources
    pub fn stop_all(&self) {
        for source in self.sources.iter().filter(|s| s.is_running()) {
            debug!(entry = %source.entry(), "stopping source");
            source.stop();
        }
    }

    /// Get result stream receiver
    ///
    /// Note: Can only be called once, subsequent calls return None
    pub fn take_receiver(&mut self) -> Option<Receiver<RecordResult>> {
        self.rx.take()
    }

    /// Run every source to the end and tally the results
    #[instrument(name = "ingestion_run", skip(self), fields(sources = self.sources.len()))]
    pub async fn run(mut self) -> Result<IngestionOutcome> {
        let rx = self.rx.take().ok_or(IngestionError::ReceiverTaken)?;
        self.start_all()?;
        // only the sources hold senders now
        self.tx = None;

        let mut attempted = 0u64;
        let mut succeeded = 0u64;
        while let Ok(record) = rx.recv().await {
            self.metrics.update_queue_len(rx.len());
            attempted += 1;
            if record.is_ingested() {
                succeeded += 1;
                counter!("batch_ingest_records_total", "status" => "ingested").increment(1);
            } else {
                counter!("batch_ingest_records_total", "status" => "rejected").increment(1);
            }
            trace!(entry = %record.entry, ordinal = record.ordinal, status = ?record.status, "record result");
        }

        let outcome = IngestionOutcome::new(attempted, succeeded);
        info!(attempted, succeeded, success_rate = outcome.success_rate(), "ingestion finished");
        Ok(outcome)
    }

    /// Get metrics reference
    pub fn metrics(&self) -> Arc<IngestionMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }
}

impl Drop for IngestionPipeline {
    fn drop(&mut self) {
        self.stop_all();
    }
}
