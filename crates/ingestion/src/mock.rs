//! Mock 记录源
//!
//! 用于无真实存储环境的测试与演示。结果是确定性的：
//! 每个条目产生 `records_per_entry` 条记录，每第 `fail_every` 条被拒绝。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_channel::Sender;
use contracts::{IngestionRequest, SourceKind};
use tracing::{debug, trace};

use crate::config::IngestionMetrics;
use crate::error::{IngestionError, Result};
use crate::executor::ReaderFactory;
use crate::record::RecordResult;
use crate::source::RecordSource;

/// Mock 读取器配置
#[derive(Debug, Clone)]
pub struct MockReaderConfig {
    /// 每个条目的记录数
    pub records_per_entry: u64,

    /// 每第 n 条记录被拒绝 (0 = 从不)
    pub fail_every: u64,

    /// 每条记录之间的延迟
    pub record_delay: Duration,

    /// 设置后工厂直接启动失败
    pub launch_error: Option<String>,
}

impl Default for MockReaderConfig {
    fn default() -> Self {
        Self {
            records_per_entry: 10,
            fail_every: 0,
            record_delay: Duration::ZERO,
            launch_error: None,
        }
    }
}

/// Mock 读取器工厂
#[derive(Debug, Clone, Default)]
pub struct MockReaderFactory {
    config: MockReaderConfig,
}

impl MockReaderFactory {
    pub fn new(config: MockReaderConfig) -> Self {
        Self { config }
    }

    /// 指定记录数与拒绝间隔
    pub fn with_records(records_per_entry: u64, fail_every: u64) -> Self {
        Self::new(MockReaderConfig {
            records_per_entry,
            fail_every,
            ..Default::default()
        })
    }

    /// 启动即失败的工厂
    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(MockReaderConfig {
            launch_error: Some(message.into()),
            ..Default::default()
        })
    }

    pub fn config(&self) -> &MockReaderConfig {
        &self.config
    }
}

impl ReaderFactory for MockReaderFactory {
    fn create_sources(&self, request: &IngestionRequest) -> Result<Vec<Box<dyn RecordSource>>> {
        if let Some(message) = &self.config.launch_error {
            return Err(IngestionError::LaunchFailed {
                message: message.clone(),
            });
        }

        let kind = request.data_source.kind();
        Ok(request
            .data_source
            .entries()
            .iter()
            .map(|entry| {
                Box::new(MockRecordSource::new(kind, entry.clone(), self.config.clone()))
                    as Box<dyn RecordSource>
            })
            .collect())
    }
}

/// Mock 记录源
pub struct MockRecordSource {
    kind: SourceKind,
    entry: String,
    config: MockReaderConfig,
    running: Arc<AtomicBool>,
}

impl MockRecordSource {
    pub fn new(kind: SourceKind, entry: impl Into<String>, config: MockReaderConfig) -> Self {
        Self {
            kind,
            entry: entry.into(),
            config,
            running: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl RecordSource for MockRecordSource {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    fn entry(&self) -> &str {
        &self.entry
    }

    fn start(&self, tx: Sender<RecordResult>, metrics: Arc<IngestionMetrics>) {
        let kind = self.kind;
        let entry = self.entry.clone();
        let config = self.config.clone();
        let running = Arc::clone(&self.running);

        running.store(true, Ordering::SeqCst);

        tokio::spawn(async move {
            debug!(kind = %kind, entry = %entry, records = config.records_per_entry, "mock source started");

            let mut finished = true;
            for ordinal in 1..=config.records_per_entry {
                if !running.load(Ordering::Relaxed) {
                    finished = false;
                    break;
                }

                metrics.record_received();
                let record = if config.fail_every > 0 && ordinal % config.fail_every == 0 {
                    metrics.record_rejected();
                    RecordResult::rejected(kind, entry.as_str(), ordinal, "mock rejection")
                } else {
                    RecordResult::ingested(kind, entry.as_str(), ordinal)
                };

                if tx.send(record).await.is_err() {
                    debug!(entry = %entry, "mock source channel closed");
                    finished = false;
                    break;
                }
                trace!(entry = %entry, ordinal, "mock record sent");

                if !config.record_delay.is_zero() {
                    tokio::time::sleep(config.record_delay).await;
                }
            }

            if finished {
                metrics.record_source_finished();
            }
            running.store(false, Ordering::SeqCst);
            debug!(entry = %entry, "mock source stopped");
        });
    }

    fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::PipelineExecutor;
    use contracts::{Credential, DataSource, FieldMapping, IngestionExecutor};
    use rand::Rng;

    fn request(data_source: DataSource) -> IngestionRequest {
        IngestionRequest {
            index_name: "idx".to_string(),
            field_map: FieldMapping::default(),
            credential: Credential::default(),
            data_source,
        }
    }

    fn s3(uris: &[&str]) -> DataSource {
        DataSource::S3 {
            uris: uris.iter().map(|u| u.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_mock_source_emits_records() {
        let source = MockRecordSource::new(
            SourceKind::OpenAi,
            "file-abc",
            MockReaderConfig {
                records_per_entry: 3,
                fail_every: 3,
                ..Default::default()
            },
        );
        let (tx, rx) = async_channel::bounded(8);
        source.start(tx, Arc::new(IngestionMetrics::new()));

        let mut records = Vec::new();
        while let Ok(record) = rx.recv().await {
            records.push(record);
        }
        assert_eq!(records.len(), 3);
        assert!(records[0].is_ingested());
        assert!(records[1].is_ingested());
        assert!(!records[2].is_ingested());
        assert_eq!(records[2].entry, "file-abc");
    }

    #[tokio::test]
    async fn test_factory_one_source_per_entry() {
        let factory = MockReaderFactory::with_records(4, 0);
        let sources = factory
            .create_sources(&request(s3(&["s3://b/1", "s3://b/2", "s3://b/3"])))
            .unwrap();
        assert_eq!(sources.len(), 3);
        assert_eq!(sources[1].entry(), "s3://b/2");
        assert_eq!(sources[1].kind(), SourceKind::S3);
    }

    #[tokio::test]
    async fn test_executor_half_rejected() {
        let executor = PipelineExecutor::new("mock", MockReaderFactory::with_records(10, 2));
        let outcome = executor
            .ingest(&request(s3(&["s3://b/1", "s3://b/2"])))
            .await
            .unwrap();
        assert_eq!(outcome.attempted, 20);
        assert_eq!(outcome.success_rate(), 50.0);
        assert_eq!(executor.name(), "mock");
    }

    #[tokio::test]
    async fn test_executor_launch_failure() {
        let executor = PipelineExecutor::new("mock", MockReaderFactory::failing("no reader"));
        let err = executor
            .ingest(&request(s3(&["s3://b/1"])))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no reader"));
    }

    #[tokio::test]
    async fn test_executor_random_record_counts() {
        let mut rng = rand::rng();
        for _ in 0..5 {
            let records = rng.random_range(1..50u64);
            let fail_every = rng.random_range(1..10u64);
            let executor =
                PipelineExecutor::new("mock", MockReaderFactory::with_records(records, fail_every));
            let outcome = executor
                .ingest(&request(DataSource::OpenAi {
                    file_ids: vec!["file-a".to_string()],
                }))
                .await
                .unwrap();
            assert_eq!(outcome.attempted, records);
            assert_eq!(outcome.failed(), records / fail_every);
        }
    }
}
