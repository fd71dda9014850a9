//! Run report and statistics.

use std::path::PathBuf;
use std::time::Duration;

use contracts::{TaskId, TaskState};
use observability::TaskOutcomeAggregator;
use orchestrator::{BatchIngestionResponse, ErrorClass, IngestError};

/// Call-level failure of one descriptor
#[derive(Debug, Clone)]
pub struct ReportedError {
    pub message: String,
    pub class: ErrorClass,
    pub task_id: Option<TaskId>,
}

impl From<&IngestError> for ReportedError {
    fn from(e: &IngestError) -> Self {
        Self {
            message: e.to_string(),
            class: e.class(),
            task_id: e.task_id().cloned(),
        }
    }
}

/// Result of one descriptor
#[derive(Debug, Clone)]
pub struct TaskReport {
    pub input: PathBuf,
    pub result: Result<BatchIngestionResponse, ReportedError>,
    /// Error stored on the task record
    pub record_error: Option<String>,
}

impl TaskReport {
    pub fn new(
        input: PathBuf,
        result: Result<BatchIngestionResponse, IngestError>,
        record_error: Option<String>,
    ) -> Self {
        Self {
            input,
            result: result.map_err(|e| ReportedError::from(&e)),
            record_error,
        }
    }

    /// Task that never reported back (panicked or cancelled)
    pub fn aborted(input: PathBuf, message: impl Into<String>) -> Self {
        Self {
            input,
            result: Err(ReportedError {
                message: message.into(),
                class: ErrorClass::Internal,
                task_id: None,
            }),
            record_error: None,
        }
    }

    fn line(&self) -> String {
        match &self.result {
            Ok(response) => {
                let mut line = format!(
                    "{} → task {} {} ({:.1}%)",
                    self.input.display(),
                    response.task_id,
                    response.state,
                    response.success_rate
                );
                if let Some(error) = &self.record_error {
                    line.push_str(&format!(": {error}"));
                }
                line
            }
            Err(e) => {
                let task = e
                    .task_id
                    .as_ref()
                    .map(|id| format!(" (task {id})"))
                    .unwrap_or_default();
                format!(
                    "{} → error{} [{}]: {}",
                    self.input.display(),
                    task,
                    e.class.status_code(),
                    e.message
                )
            }
        }
    }
}

/// Statistics from a `run` invocation
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Per-descriptor results, in completion order
    pub reports: Vec<TaskReport>,

    /// Wall time of the run
    pub duration: Duration,

    /// Terminal state aggregation
    pub outcomes: TaskOutcomeAggregator,
}

impl RunStats {
    pub fn record(&mut self, report: TaskReport) {
        match &report.result {
            Ok(response) => self.outcomes.update(
                response.state,
                response.success_rate,
                report.record_error.as_deref(),
            ),
            Err(e) => self
                .outcomes
                .update(TaskState::Failed, 0.0, Some(e.message.as_str())),
        }
        self.reports.push(report);
    }

    pub fn total(&self) -> u64 {
        self.outcomes.total_tasks
    }

    /// Descriptors that did not end `COMPLETED`
    pub fn failed(&self) -> u64 {
        self.outcomes.total_tasks - self.outcomes.completed
    }

    /// Tasks per second
    pub fn throughput(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.total() as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                  Batch Ingestion Results                     ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");

        println!("📋 Tasks");
        for (i, report) in self.reports.iter().enumerate() {
            let prefix = if i == self.reports.len() - 1 { "└─" } else { "├─" };
            println!("   {} {}", prefix, report.line());
        }

        println!("\n📊 Overview");
        println!("   ├─ Duration: {:.2}s", self.duration.as_secs_f64());
        println!("   ├─ Tasks/s: {:.2}", self.throughput());
        println!("   └─ Not completed: {}", self.failed());

        println!("\n{}", self.outcomes.summary());
    }
}
