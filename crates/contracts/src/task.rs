//! Task - 任务记录
//!
//! 一次批量导入运行的可追踪记录：ID、状态、错误信息、时间戳。

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 任务 ID（不透明字符串，由存储层分配）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TaskId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// 任务状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    Created,
    Running,
    Completed,
    Failed,
    /// 预留，当前流程不会产生
    Cancelled,
}

impl TaskState {
    /// 是否为终态
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Running => "RUNNING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 任务类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    #[default]
    BatchIngest,
}

/// 持久化的任务记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// 任务 ID，创建成功后才存在
    #[serde(rename = "task_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TaskId>,

    /// 任务类型
    #[serde(default)]
    pub task_type: TaskType,

    /// 当前状态
    pub state: TaskState,

    /// 失败原因，仅在 FAILED 时存在
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// 目标索引
    pub output_index: String,

    /// 是否异步执行
    #[serde(default)]
    pub is_async: bool,

    /// 创建时间
    pub create_time: DateTime<Utc>,

    /// 最后更新时间
    pub last_update_time: DateTime<Utc>,
}

impl Task {
    /// 创建一个新的批量导入任务（状态 CREATED，尚无 ID）
    pub fn batch_ingest(output_index: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            task_type: TaskType::BatchIngest,
            state: TaskState::Created,
            error: None,
            output_index: output_index.into(),
            is_async: true,
            create_time: now,
            last_update_time: now,
        }
    }

    /// 附加存储层分配的 ID
    pub fn with_id(mut self, id: TaskId) -> Self {
        self.id = Some(id);
        self
    }

    /// 应用字段更新
    ///
    /// 状态离开 FAILED 时会清除错误信息。
    pub fn apply(&mut self, update: &TaskUpdate) {
        if let Some(state) = update.state {
            self.state = state;
            if state != TaskState::Failed {
                self.error = None;
            }
        }
        if let Some(ref error) = update.error {
            self.error = Some(error.clone());
        }
        self.last_update_time = Utc::now();
    }
}

/// 待写入的字段集合
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<TaskState>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TaskUpdate {
    /// 仅更新状态
    pub fn state(state: TaskState) -> Self {
        Self {
            state: Some(state),
            error: None,
        }
    }

    /// 标记完成
    pub fn completed() -> Self {
        Self::state(TaskState::Completed)
    }

    /// 标记失败并记录原因
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            state: Some(TaskState::Failed),
            error: Some(error.into()),
        }
    }

    /// 该更新是否把任务推入终态
    pub fn is_terminal(&self) -> bool {
        self.state.is_some_and(TaskState::is_terminal)
    }
}
