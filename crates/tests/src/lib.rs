//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 合约快照测试 (持久化记录与响应的 JSON 形状)
//! - 端到端测试：描述文件 → 校验 → 任务登记 → 导入 → 终态
//! - 并发与容量测试

#[cfg(test)]
mod contract_tests {
    use contracts::{Task, TaskId, TaskState, TaskType, TaskUpdate};
    use orchestrator::BatchIngestionResponse;
    use serde_json::json;

    #[test]
    fn test_task_record_shape() {
        let mut task = Task::batch_ingest("testIndex").with_id(TaskId::from("t-1"));
        task.apply(&TaskUpdate::failed("batch ingestion successful rate is 0"));

        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["task_id"], "t-1");
        assert_eq!(value["task_type"], "BATCH_INGEST");
        assert_eq!(value["state"], "FAILED");
        assert_eq!(value["error"], "batch ingestion successful rate is 0");
        assert_eq!(value["output_index"], "testIndex");
        assert_eq!(value["is_async"], true);
        assert!(value.get("create_time").is_some());
        assert!(value.get("last_update_time").is_some());
    }

    #[test]
    fn test_response_shape() {
        let response = BatchIngestionResponse {
            task_id: TaskId::from("t-1"),
            task_type: TaskType::BatchIngest,
            state: TaskState::Completed,
            success_rate: 100.0,
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "task_id": "t-1",
                "task_type": "BATCH_INGEST",
                "state": "COMPLETED",
                "success_rate": 100.0
            })
        );
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::io::Write;
    use std::sync::Arc;

    use contracts::{BatchIngestionInput, TaskState};
    use ingestion::{MockReaderFactory, PipelineExecutor};
    use input_loader::{InputFormat, InputLoader};
    use orchestrator::{BatchIngestionOrchestrator, ErrorClass, IngestError, OrchestratorConfig};
    use task_registry::{InMemoryTaskStore, RegistryConfig, TaskRegistry};

    type Orchestrator =
        BatchIngestionOrchestrator<InMemoryTaskStore, PipelineExecutor<MockReaderFactory>>;

    fn orchestrator(factory: MockReaderFactory) -> Orchestrator {
        BatchIngestionOrchestrator::new(
            Arc::new(TaskRegistry::new(
                InMemoryTaskStore::new(),
                RegistryConfig::default(),
            )),
            Arc::new(PipelineExecutor::new("mock", factory)),
            OrchestratorConfig::default(),
        )
    }

    fn example_input() -> BatchIngestionInput {
        InputLoader::load_from_str(
            r#"{
                "index_name": "testIndex",
                "data_source": {"type": "s3", "source": ["s3://bucket/valid.json"]}
            }"#,
            InputFormat::Json,
        )
        .unwrap()
    }

    /// 示例场景：单个合法 S3 URI，1/1 条记录成功 → COMPLETED，成功率 100
    #[tokio::test]
    async fn test_example_scenario_completes() {
        let orchestrator = orchestrator(MockReaderFactory::with_records(1, 0));

        let response = orchestrator.execute(&example_input()).await.unwrap();
        assert_eq!(response.state, TaskState::Completed);
        assert_eq!(response.success_rate, 100.0);

        let task = orchestrator
            .registry()
            .get_task(&response.task_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(task.state, TaskState::Completed);
        assert_eq!(task.error, None);
        assert_eq!(task.output_index, "testIndex");
    }

    #[tokio::test]
    async fn test_partial_ingestion_fails_task() {
        let orchestrator = orchestrator(MockReaderFactory::with_records(10, 2));

        let response = orchestrator.execute(&example_input()).await.unwrap();
        assert_eq!(response.state, TaskState::Failed);
        assert_eq!(response.success_rate, 50.0);

        let task = orchestrator
            .registry()
            .get_task(&response.task_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            task.error.as_deref(),
            Some("batch ingestion successful rate is 50.0")
        );
    }

    #[tokio::test]
    async fn test_every_record_rejected() {
        let orchestrator = orchestrator(MockReaderFactory::with_records(4, 1));

        let response = orchestrator.execute(&example_input()).await.unwrap();
        assert_eq!(response.state, TaskState::Failed);
        assert_eq!(response.success_rate, 0.0);
    }

    #[tokio::test]
    async fn test_invalid_uris_rejected_before_task_creation() {
        let orchestrator = orchestrator(MockReaderFactory::default());
        let input = BatchIngestionInput::new("testIndex").with_source(
            "s3",
            ["s3://bucket/ok.json", "invalid s3", "http://bucket/x"],
        );

        let err = orchestrator.execute(&input).await.unwrap_err();
        assert_eq!(err.class(), ErrorClass::ClientInput);
        assert_eq!(
            err.to_string(),
            "IllegalArgumentException in the batch ingestion input: \
             The following batch ingest input S3 URIs are invalid: [invalid s3, http://bucket/x]"
        );
        assert!(orchestrator.registry().store().is_empty().await);
    }

    #[tokio::test]
    async fn test_empty_source_list() {
        let orchestrator = orchestrator(MockReaderFactory::default());
        let input = BatchIngestionInput::new("testIndex").with_source("s3", Vec::<String>::new());

        let err = orchestrator.execute(&input).await.unwrap_err();
        assert!(err
            .to_string()
            .ends_with("The batch ingest input s3Uris is empty"));
    }

    #[tokio::test]
    async fn test_launch_failure_recorded_on_task() {
        let orchestrator = orchestrator(MockReaderFactory::failing("reader pool exhausted"));

        let err = orchestrator.execute(&example_input()).await.unwrap_err();
        assert!(matches!(err, IngestError::ExecutorLaunch { .. }));
        assert_eq!(err.class(), ErrorClass::Internal);

        let task_id = err.task_id().cloned().unwrap();
        let task = orchestrator
            .registry()
            .get_task(&task_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(task.state, TaskState::Failed);
        assert_eq!(task.error, Some(err.to_string()));
    }

    #[tokio::test]
    async fn test_toml_descriptor_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
index_name = "openai-index"

[credential]
api_key = "secret"

[data_source]
type = "openAI"
source = ["file-abc123", "file-def456"]
"#
        )
        .unwrap();

        let input = InputLoader::load_from_path(file.path()).unwrap();
        let orchestrator = orchestrator(MockReaderFactory::with_records(5, 0));

        let response = orchestrator.execute(&input).await.unwrap();
        assert_eq!(response.state, TaskState::Completed);
    }
}

#[cfg(test)]
mod concurrency_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use contracts::{BatchIngestionInput, TaskState};
    use ingestion::{MockReaderConfig, MockReaderFactory, PipelineExecutor};
    use orchestrator::{BatchIngestionOrchestrator, IngestError, OrchestratorConfig};
    use task_registry::{InMemoryTaskStore, RegistryConfig, RegistryError, TaskRegistry};

    fn input(n: usize) -> BatchIngestionInput {
        BatchIngestionInput::new(format!("index-{n}"))
            .with_source("s3", [format!("s3://bucket/{n}.json")])
    }

    fn orchestrator(
        registry_config: RegistryConfig,
        reader: MockReaderConfig,
    ) -> BatchIngestionOrchestrator<InMemoryTaskStore, PipelineExecutor<MockReaderFactory>> {
        BatchIngestionOrchestrator::new(
            Arc::new(TaskRegistry::new(InMemoryTaskStore::new(), registry_config)),
            Arc::new(PipelineExecutor::new("mock", MockReaderFactory::new(reader))),
            OrchestratorConfig::default(),
        )
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_many_concurrent_tasks() {
        for shards in [1, 8] {
            let orchestrator = orchestrator(
                RegistryConfig {
                    update_lock_shards: shards,
                    ..RegistryConfig::default()
                },
                MockReaderConfig::default(),
            );

            let mut handles = Vec::new();
            for n in 0..50 {
                let orchestrator = orchestrator.clone();
                handles.push(tokio::spawn(async move { orchestrator.execute(&input(n)).await }));
            }
            for handle in handles {
                let response = handle.await.unwrap().unwrap();
                assert_eq!(response.state, TaskState::Completed);
            }

            let registry = orchestrator.registry();
            assert_eq!(registry.running_count(), 0);
            let tasks = registry.store().snapshot().await;
            assert_eq!(tasks.len(), 50);
            assert!(tasks.iter().all(|t| t.state == TaskState::Completed));
        }
    }

    #[tokio::test]
    async fn test_capacity_rejects_while_busy() {
        let orchestrator = orchestrator(
            RegistryConfig {
                max_running_tasks: 1,
                ..RegistryConfig::default()
            },
            MockReaderConfig {
                records_per_entry: 5,
                record_delay: Duration::from_millis(20),
                ..MockReaderConfig::default()
            },
        );

        let first = orchestrator.submit(&input(1)).await.unwrap();
        assert_eq!(first.state, TaskState::Running);

        let err = orchestrator.execute(&input(2)).await.unwrap_err();
        let IngestError::Registration { task_id, source } = &err else {
            panic!("expected registration error, got {err:?}");
        };
        assert!(matches!(source, RegistryError::CapacityExceeded { limit: 1 }));

        let rejected = orchestrator
            .registry()
            .get_task(task_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(rejected.state, TaskState::Failed);
        assert_eq!(rejected.error, Some(err.to_string()));

        let response = first.handle.await.unwrap().unwrap();
        assert_eq!(response.state, TaskState::Completed);

        // slot is free again
        let response = orchestrator.execute(&input(3)).await.unwrap();
        assert_eq!(response.state, TaskState::Completed);
    }
}
