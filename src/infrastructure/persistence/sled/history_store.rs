//! Sled-based History Store Implementation
//!
//! 整个历史列表以 JSON 快照存放在固定键下

use async_trait::async_trait;
use sled::Db;
use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{HistoryStoreError, HistoryStorePort};
use crate::domain::history::HISTORY_STORAGE_KEY;
use crate::domain::HistoryRecord;

/// Sled 历史记录存储配置
#[derive(Debug, Clone)]
pub struct SledHistoryConfig {
    /// 数据库路径
    pub db_path: String,
}

impl Default for SledHistoryConfig {
    fn default() -> Self {
        Self {
            db_path: "data/history.sled".to_string(),
        }
    }
}

/// Sled 历史记录存储
pub struct SledHistoryStore {
    db: Db,
}

impl SledHistoryStore {
    /// 打开（或创建）存储
    pub fn new(config: &SledHistoryConfig) -> Result<Self, HistoryStoreError> {
        let db = sled::open(&config.db_path)
            .map_err(|e| HistoryStoreError::DatabaseError(e.to_string()))?;

        tracing::info!(db_path = %config.db_path, "SledHistoryStore initialized");

        Ok(Self { db })
    }

    /// 从路径打开
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, HistoryStoreError> {
        Self::new(&SledHistoryConfig {
            db_path: path.as_ref().to_string_lossy().to_string(),
        })
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait]
impl HistoryStorePort for SledHistoryStore {
    async fn load(&self) -> Result<Vec<HistoryRecord>, HistoryStoreError> {
        match self.db.get(HISTORY_STORAGE_KEY) {
            Ok(Some(data)) => serde_json::from_slice(&data)
                .map_err(|e| HistoryStoreError::SerializationError(e.to_string())),
            Ok(None) => Ok(Vec::new()),
            Err(e) => Err(HistoryStoreError::DatabaseError(e.to_string())),
        }
    }

    async fn save(&self, records: &[HistoryRecord]) -> Result<(), HistoryStoreError> {
        let snapshot = serde_json::to_vec(records)
            .map_err(|e| HistoryStoreError::SerializationError(e.to_string()))?;

        self.db
            .insert(HISTORY_STORAGE_KEY, snapshot)
            .map_err(|e| HistoryStoreError::DatabaseError(e.to_string()))?;
        self.db
            .flush_async()
            .await
            .map_err(|e| HistoryStoreError::DatabaseError(e.to_string()))?;

        tracing::debug!(count = records.len(), "History saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_empty_store_loads_nothing() {
        let dir = tempdir().unwrap();
        let store = SledHistoryStore::open(dir.path().join("history.sled")).unwrap();
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.sled");
        let records = vec![
            HistoryRecord::new("2", "b.mp3"),
            HistoryRecord::new("1", "a.mp3"),
        ];

        {
            let store = SledHistoryStore::open(&path).unwrap();
            store.save(&records).await.unwrap();
        }

        let store = SledHistoryStore::open(&path).unwrap();
        assert_eq!(store.load().await.unwrap(), records);
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_is_serialization_error() {
        let dir = tempdir().unwrap();
        let store = SledHistoryStore::open(dir.path().join("history.sled")).unwrap();
        store.db.insert(HISTORY_STORAGE_KEY, b"not json".to_vec()).unwrap();

        let result = store.load().await;
        assert!(matches!(result, Err(HistoryStoreError::SerializationError(_))));
    }
}
