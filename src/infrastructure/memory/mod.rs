//! Memory Layer - In-Memory State
//!
//! 不落盘的历史记录存储，用于测试与临时会话

mod history_store;

pub use history_store::InMemoryHistoryStore;
