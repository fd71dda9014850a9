//! # Observability
//!
//! 可观测性模块：Tracing + Prometheus 指标。
//!
//! ## 功能
//!
//! - Tracing 初始化 (JSON/Pretty/Compact 格式)
//! - Prometheus 指标导出
//! - 批量导入任务指标收集与统计
//!
//! ## 使用示例
//!
//! ```ignore
//! use observability::{ObservabilityConfig, LogFormat};
//!
//! observability::init_with_config(ObservabilityConfig {
//!     log_format: LogFormat::Compact,
//!     ..ObservabilityConfig::default()
//! })?;
//! observability::install_metrics_exporter(9464)?;
//!
//! // orchestrator 在任务进入终态时调用
//! observability::record_task_terminal(TaskState::Completed);
//! observability::record_success_rate(100.0);
//! ```

pub mod metrics;

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

// Re-exports
pub use crate::metrics::{
    record_running_tasks, record_success_rate, record_task_created, record_task_terminal,
    record_task_update_failure, record_update_lock_wait_ms, record_validation_failure,
    OutcomeSummary, RunningStats, StatsSummary, TaskOutcomeAggregator,
};

/// 未设置 RUST_LOG 时的过滤规则
pub const DEFAULT_LOG_FILTER: &str = "info";

/// 可观测性配置
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// 日志格式
    pub log_format: LogFormat,
    /// Prometheus 端口 (None = 不导出指标)
    pub metrics_port: Option<u16>,
    /// RUST_LOG 缺省时使用的过滤规则
    pub default_log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Compact,
            metrics_port: None,
            default_log_level: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// 日志格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON 结构化日志，带任务 span 字段
    Json,
    /// 人类可读格式
    Pretty,
    /// 单行格式，命令行默认
    #[default]
    Compact,
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn fmt_layer(format: LogFormat) -> BoxedLayer {
    match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_target(true)
            .boxed(),
        LogFormat::Pretty => fmt::layer().pretty().boxed(),
        LogFormat::Compact => fmt::layer().compact().with_target(false).boxed(),
    }
}

/// 初始化 tracing subscriber，按需安装 Prometheus 导出器
pub fn init_with_config(config: ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_log_level));

    tracing_subscriber::registry()
        .with(fmt_layer(config.log_format))
        .with(filter)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    if let Some(port) = config.metrics_port {
        install_metrics_exporter(port)?;
    }

    tracing::debug!(
        log_format = ?config.log_format,
        metrics_port = ?config.metrics_port,
        "Batch ingest observability ready"
    );
    Ok(())
}

/// 安装 Prometheus 导出器，暴露 `batch_ingest_*` 指标
///
/// tracing 已初始化时单独调用，例如 `run --metrics-port`。
pub fn install_metrics_exporter(port: u16) -> Result<()> {
    PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], port))
        .install()
        .with_context(|| format!("Failed to expose batch ingest metrics on port {port}"))?;

    tracing::info!(port, "Batch ingest metrics exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ObservabilityConfig::default();
        assert_eq!(config.metrics_port, None);
        assert_eq!(config.default_log_level, DEFAULT_LOG_FILTER);
        assert_eq!(config.log_format, LogFormat::Compact);
    }
}
