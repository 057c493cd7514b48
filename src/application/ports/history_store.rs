//! History Store Port - 历史记录持久化
//!
//! 整表快照读写，键固定

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::HistoryRecord;

#[derive(Debug, Error)]
pub enum HistoryStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[async_trait]
pub trait HistoryStorePort: Send + Sync {
    /// 读取全部记录，未保存过时返回空列表
    async fn load(&self) -> Result<Vec<HistoryRecord>, HistoryStoreError>;

    /// 覆盖保存全部记录
    async fn save(&self, records: &[HistoryRecord]) -> Result<(), HistoryStoreError>;
}
