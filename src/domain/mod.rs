//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Payment Context: 收款金额与返回格式
//! - History Context: 客户端生成历史

pub mod history;
pub mod payment;

pub use history::{HistoryList, HistoryRecord};
pub use payment::{format_display, Amount, AmountError, ReturnFormat};
