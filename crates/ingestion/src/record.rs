//! 单条记录的导入结果

use contracts::SourceKind;

/// 记录状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordStatus {
    /// 已写入目标索引
    Ingested,
    /// 被拒绝
    Rejected {
        /// 拒绝原因
        reason: String,
    },
}

/// 单条记录的导入结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordResult {
    /// 数据源类型
    pub kind: SourceKind,
    /// 数据源条目 (URI / file id)
    pub entry: String,
    /// 条目内序号 (从 1 开始)
    pub ordinal: u64,
    /// 记录状态
    pub status: RecordStatus,
}

impl RecordResult {
    pub fn ingested(kind: SourceKind, entry: impl Into<String>, ordinal: u64) -> Self {
        Self {
            kind,
            entry: entry.into(),
            ordinal,
            status: RecordStatus::Ingested,
        }
    }

    pub fn rejected(
        kind: SourceKind,
        entry: impl Into<String>,
        ordinal: u64,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            entry: entry.into(),
            ordinal,
            status: RecordStatus::Rejected {
                reason: reason.into(),
            },
        }
    }

    pub fn is_ingested(&self) -> bool {
        matches!(self.status, RecordStatus::Ingested)
    }
}
