//! 记录源 trait

use std::sync::Arc;

use async_channel::Sender;
use contracts::SourceKind;

use crate::config::IngestionMetrics;
use crate::record::RecordResult;

/// 记录源 trait
///
/// 每个数据源条目 (S3 URI / OpenAI file id) 对应一个实现，负责：
/// 1. 读取条目中的记录
/// 2. 为每条记录产生 `RecordResult`
/// 3. 发送到通道，读完后释放发送端
pub trait RecordSource: Send + Sync {
    /// 数据源类型
    fn kind(&self) -> SourceKind;

    /// 数据源条目
    fn entry(&self) -> &str;

    /// 开始读取
    ///
    /// # Arguments
    /// * `tx` - 记录结果发送通道
    /// * `metrics` - 共享的 ingestion 指标
    fn start(&self, tx: Sender<RecordResult>, metrics: Arc<IngestionMetrics>);

    /// 停止读取
    fn stop(&self);

    /// 检查是否正在读取
    fn is_running(&self) -> bool;
}
