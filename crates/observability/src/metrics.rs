//! 批量导入任务指标收集模块
//!
//! 记录任务生命周期、更新锁等待与成功率分布。

use std::collections::BTreeMap;

use contracts::TaskState;
use metrics::{counter, gauge, histogram};

/// 记录任务创建
pub fn record_task_created() {
    counter!("batch_ingest_tasks_created_total").increment(1);
}

/// 记录任务进入终态
pub fn record_task_terminal(state: TaskState) {
    counter!(
        "batch_ingest_tasks_terminal_total",
        "state" => state.as_str()
    )
    .increment(1);
}

/// 记录输入校验失败
pub fn record_validation_failure() {
    counter!("batch_ingest_validation_failures_total").increment(1);
}

/// 记录单个任务的成功率 (0..=100)
pub fn record_success_rate(rate: f64) {
    histogram!("batch_ingest_success_rate").record(rate);
}

/// 记录更新锁等待时间
pub fn record_update_lock_wait_ms(wait_ms: f64) {
    histogram!("batch_ingest_update_lock_wait_ms").record(wait_ms);
}

/// 记录任务记录更新失败
///
/// `reason` 取值如 `lock_timeout`、`store`。
pub fn record_task_update_failure(reason: &'static str) {
    counter!(
        "batch_ingest_task_update_failures_total",
        "reason" => reason
    )
    .increment(1);
}

/// 记录当前运行中任务数
pub fn record_running_tasks(count: usize) {
    gauge!("batch_ingest_running_tasks").set(count as f64);
}

/// 任务结果聚合器
///
/// 在内存中聚合任务终态，便于统计和输出摘要。
#[derive(Debug, Clone, Default)]
pub struct TaskOutcomeAggregator {
    /// 总任务数
    pub total_tasks: u64,

    /// 成功任务数
    pub completed: u64,

    /// 失败任务数
    pub failed: u64,

    /// 成功率统计
    pub rate_stats: RunningStats,

    /// 各失败信息出现次数
    pub failure_messages: BTreeMap<String, u64>,
}

impl TaskOutcomeAggregator {
    /// 创建新的聚合器
    pub fn new() -> Self {
        Self::default()
    }

    /// 更新聚合统计
    pub fn update(&mut self, state: TaskState, success_rate: f64, error: Option<&str>) {
        self.total_tasks += 1;
        match state {
            TaskState::Completed => self.completed += 1,
            TaskState::Failed => self.failed += 1,
            _ => {}
        }
        self.rate_stats.push(success_rate);

        if let Some(message) = error {
            *self.failure_messages.entry(message.to_string()).or_insert(0) += 1;
        }
    }

    /// 生成摘要报告
    pub fn summary(&self) -> OutcomeSummary {
        OutcomeSummary {
            total_tasks: self.total_tasks,
            completed: self.completed,
            failed: self.failed,
            completion_rate: if self.total_tasks > 0 {
                self.completed as f64 / self.total_tasks as f64 * 100.0
            } else {
                0.0
            },
            success_rate: StatsSummary::from(&self.rate_stats),
            failure_messages: self.failure_messages.clone(),
        }
    }

    /// 重置统计
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// 结果摘要
#[derive(Debug, Clone, Default)]
pub struct OutcomeSummary {
    pub total_tasks: u64,
    pub completed: u64,
    pub failed: u64,
    pub completion_rate: f64,
    pub success_rate: StatsSummary,
    pub failure_messages: BTreeMap<String, u64>,
}

impl std::fmt::Display for OutcomeSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Batch Ingestion Summary ===")?;
        writeln!(f, "Total tasks: {}", self.total_tasks)?;
        writeln!(
            f,
            "Completed: {} ({:.2}%)",
            self.completed, self.completion_rate
        )?;
        writeln!(f, "Failed: {}", self.failed)?;
        writeln!(f, "Success rate (%): {}", self.success_rate)?;

        if !self.failure_messages.is_empty() {
            writeln!(f, "Failure messages:")?;
            for (message, count) in &self.failure_messages {
                writeln!(f, "  {}: {}", message, count)?;
            }
        }

        Ok(())
    }
}

/// 统计摘要
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.1}, max={:.1}, mean={:.1}, std={:.1} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// 在线统计计算器 (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// 添加新值
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            self.m2 += delta * (value - self.mean);
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}
