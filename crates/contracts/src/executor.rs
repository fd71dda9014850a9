//! IngestionExecutor trait - Ingestion engine interface
//!
//! The orchestrator hands a validated request to an executor and gets back
//! per-record counts. Record-level failures are part of the outcome; `Err`
//! means the executor could not run at all.

use serde::{Deserialize, Serialize};

use crate::{ContractError, IngestionRequest};

/// Per-record tally of one ingestion run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionOutcome {
    /// Records the engine tried to ingest
    pub attempted: u64,
    /// Records ingested without error
    pub succeeded: u64,
}

impl IngestionOutcome {
    pub fn new(attempted: u64, succeeded: u64) -> Self {
        Self {
            attempted,
            succeeded,
        }
    }

    pub fn failed(&self) -> u64 {
        self.attempted.saturating_sub(self.succeeded)
    }

    /// `succeeded / attempted * 100`, in `[0, 100]`
    ///
    /// An empty run (nothing attempted) counts as 0.
    pub fn success_rate(&self) -> f64 {
        if self.attempted == 0 {
            return 0.0;
        }
        let rate = self.succeeded as f64 / self.attempted as f64 * 100.0;
        rate.clamp(0.0, 100.0)
    }
}

/// Ingestion engine
#[trait_variant::make(IngestionExecutor: Send)]
pub trait LocalIngestionExecutor {
    /// Executor name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Read, transform and write every record of `request`
    ///
    /// # Errors
    /// Returns an error only when the engine cannot start; its message is
    /// shown to the caller and stored on the task unchanged.
    async fn ingest(&self, request: &IngestionRequest) -> Result<IngestionOutcome, ContractError>;
}
