//! Sled Persistence - 嵌入式键值存储

mod history_store;

pub use history_store::{SledHistoryConfig, SledHistoryStore};
