//! History Context - Entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 历史记录上限
pub const MAX_HISTORY: usize = 10;

/// 本地存储键
pub const HISTORY_STORAGE_KEY: &str = "alipayVoiceHistory";

/// 一次成功的音频生成
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub id: String,
    pub amount: String,
    pub timestamp: DateTime<Utc>,
    /// 本地音频资源引用
    pub audio_url: String,
}

impl HistoryRecord {
    pub fn new(amount: impl Into<String>, audio_url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            amount: amount.into(),
            timestamp: Utc::now(),
            audio_url: audio_url.into(),
        }
    }

    /// 下载文件名: alipay_voice_<amount>_<YYYY-MM-DD>.mp3
    pub fn download_file_name(&self) -> String {
        format!(
            "alipay_voice_{}_{}.mp3",
            self.amount,
            self.timestamp.format("%Y-%m-%d")
        )
    }
}

/// 有上限的历史列表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryList {
    records: Vec<HistoryRecord>,
}

impl HistoryList {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从持久化快照恢复，超出上限的旧记录被丢弃
    pub fn from_records(mut records: Vec<HistoryRecord>) -> Self {
        records.truncate(MAX_HISTORY);
        Self { records }
    }

    /// 插入到最前，溢出时淘汰最旧的
    pub fn push_front(&mut self, record: HistoryRecord) {
        self.records.insert(0, record);
        self.records.truncate(MAX_HISTORY);
    }

    pub fn find(&self, id: &str) -> Option<&HistoryRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }
}
