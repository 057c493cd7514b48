//! History Context - 生成历史
//!
//! 客户端独占的最近生成记录，最新在前，最多保留 MAX_HISTORY 条

mod entities;

pub use entities::{HistoryList, HistoryRecord, HISTORY_STORAGE_KEY, MAX_HISTORY};
