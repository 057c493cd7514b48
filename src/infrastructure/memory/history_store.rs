//! In-Memory History Store Implementation

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{HistoryStoreError, HistoryStorePort};
use crate::domain::HistoryRecord;

/// 内存历史记录存储，进程退出即丢失
pub struct InMemoryHistoryStore {
    records: RwLock<Vec<HistoryRecord>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryHistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistoryStorePort for InMemoryHistoryStore {
    async fn load(&self) -> Result<Vec<HistoryRecord>, HistoryStoreError> {
        Ok(self.records.read().await.clone())
    }

    async fn save(&self, records: &[HistoryRecord]) -> Result<(), HistoryStoreError> {
        *self.records.write().await = records.to_vec();
        tracing::debug!(count = records.len(), "History saved in memory");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_replaces_snapshot() {
        let store = InMemoryHistoryStore::new();
        assert!(store.load().await.unwrap().is_empty());

        let first = HistoryRecord::new("1", "a.mp3");
        let second = HistoryRecord::new("2", "b.mp3");
        store.save(&[first.clone(), second.clone()]).await.unwrap();
        store.save(&[second.clone()]).await.unwrap();

        assert_eq!(store.load().await.unwrap(), vec![second]);
    }
}
