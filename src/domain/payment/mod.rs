//! Payment Context - 收款金额上下文
//!
//! 职责:
//! - 金额输入解析与范围校验（客户端与服务端共用）
//! - 金额显示格式化
//! - 返回格式（音频 / JSON）

mod errors;
mod value_objects;

pub use errors::AmountError;
pub use value_objects::{format_display, strip_grouping, Amount, ReturnFormat, AMOUNT_UPPER_BOUND};
