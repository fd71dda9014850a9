//! Ingestion 错误类型

use contracts::{ContractError, SourceKind};
use thiserror::Error;

/// Ingestion 错误
#[derive(Debug, Error)]
pub enum IngestionError {
    /// 无法为数据源条目创建读取器
    #[error("failed to open {kind} source {entry}: {message}")]
    SourceCreation {
        /// 数据源类型
        kind: SourceKind,
        /// 数据源条目 (URI / file id)
        entry: String,
        /// 错误消息
        message: String,
    },

    /// 读取器工厂无法启动
    #[error("failed to launch ingestion: {message}")]
    LaunchFailed {
        /// 错误消息
        message: String,
    },

    /// 通道已关闭
    #[error("record channel already closed")]
    ChannelClosed,

    /// 接收端已被取走
    #[error("record receiver already taken")]
    ReceiverTaken,
}

impl From<IngestionError> for ContractError {
    fn from(e: IngestionError) -> Self {
        ContractError::executor(e.to_string())
    }
}

/// Ingestion Result 类型别名
pub type Result<T> = std::result::Result<T, IngestionError>;
